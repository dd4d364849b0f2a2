//! Owner record workflows: lookup, search, create, update, pet registration
//! and visit booking.
//!
//! Each workflow loads the aggregate, changes it only through the
//! [`Owner`] API, and hands it back to the repository.

use petclinic_core::error::CoreError;
use petclinic_core::owner::Owner;
use petclinic_core::pet::Pet;
use petclinic_core::ports::OwnerRepository;
use petclinic_core::types::{DbId, Entity};
use petclinic_core::visit::{today, Visit};
use validator::Validate;

pub const OWNER_ID_MISMATCH: &str = "The owner ID in the form does not match the URL.";

/// Outcome of a last-name search.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerSearch {
    NoMatch,
    /// Exactly one owner; callers usually jump straight to it.
    Single(Owner),
    Multiple(Vec<Owner>),
}

impl OwnerSearch {
    fn from_results(mut owners: Vec<Owner>) -> Self {
        match owners.len() {
            0 => OwnerSearch::NoMatch,
            1 => OwnerSearch::Single(owners.remove(0)),
            _ => OwnerSearch::Multiple(owners),
        }
    }
}

pub struct OwnerDirectory;

impl OwnerDirectory {
    /// Load an owner or fail with `NotFound`.
    pub fn find_owner<R>(repo: &R, owner_id: DbId) -> Result<Owner, CoreError>
    where
        R: OwnerRepository + ?Sized,
    {
        repo.find_by_id(owner_id)?.ok_or(CoreError::NotFound {
            entity: "Owner",
            id: owner_id,
        })
    }

    /// Validate and store a new owner, returning it with its assigned id.
    pub fn create_owner<R>(repo: &mut R, mut owner: Owner) -> Result<Owner, CoreError>
    where
        R: OwnerRepository + ?Sized,
    {
        if let Some(id) = owner.id() {
            return Err(CoreError::Conflict(format!(
                "Owner {id} already exists; update it instead"
            )));
        }
        owner.validate()?;
        repo.save(&mut owner)?;
        tracing::info!(owner_id = ?owner.id(), last_name = owner.last_name(), "New owner created");
        Ok(owner)
    }

    /// Find owners by last-name prefix. `None` or `""` matches everyone.
    pub fn search_by_last_name<R>(repo: &R, last_name: Option<&str>) -> Result<OwnerSearch, CoreError>
    where
        R: OwnerRepository + ?Sized,
    {
        let prefix = last_name.unwrap_or("");
        let owners = repo.find_by_last_name_prefix(prefix)?;
        tracing::debug!(prefix, matches = owners.len(), "Owner search");
        Ok(OwnerSearch::from_results(owners))
    }

    /// Replace the contact details of owner `owner_id` with those in `form`.
    ///
    /// The form may omit its id; if it carries one it must be `owner_id`.
    /// Pets and visits already on file are kept.
    pub fn update_owner<R>(repo: &mut R, owner_id: DbId, form: Owner) -> Result<Owner, CoreError>
    where
        R: OwnerRepository + ?Sized,
    {
        form.validate()?;
        if form.id().is_some_and(|id| id != owner_id) {
            tracing::warn!(owner_id, form_id = ?form.id(), "Owner id mismatch");
            return Err(CoreError::Conflict(OWNER_ID_MISMATCH.to_string()));
        }

        let mut owner = Self::find_owner(repo, owner_id)?;
        owner.update_contact_details(&form);
        repo.save(&mut owner)?;
        tracing::info!(owner_id, "Owner updated");
        Ok(owner)
    }

    /// Add a pet to owner `owner_id` and store it.
    ///
    /// New pets need a name that no persisted pet of this owner already
    /// uses (case-insensitive) and a birth date no later than today. An
    /// already persisted pet is accepted and ignored, as
    /// [`Owner::add_pet`] does.
    pub fn register_pet<R>(repo: &mut R, owner_id: DbId, pet: Pet) -> Result<Owner, CoreError>
    where
        R: OwnerRepository + ?Sized,
    {
        let mut owner = Self::find_owner(repo, owner_id)?;
        if pet.is_new() {
            check_new_pet(&owner, &pet)?;
        }
        owner.add_pet(pet);
        repo.save(&mut owner)?;
        tracing::info!(owner_id, pets = owner.pets().len(), "Pet registered");
        Ok(owner)
    }

    /// Book a visit for one of the owner's persisted pets.
    pub fn book_visit<R>(
        repo: &mut R,
        owner_id: DbId,
        pet_id: Option<DbId>,
        visit: Option<Visit>,
    ) -> Result<Owner, CoreError>
    where
        R: OwnerRepository + ?Sized,
    {
        if let Some(visit) = &visit {
            visit.validate()?;
        }
        let mut owner = Self::find_owner(repo, owner_id)?;
        owner.add_visit(pet_id, visit)?;
        repo.save(&mut owner)?;
        tracing::info!(owner_id, pet_id = ?pet_id, "Visit booked");
        Ok(owner)
    }
}

fn check_new_pet(owner: &Owner, pet: &Pet) -> Result<(), CoreError> {
    let name = match pet.name() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(CoreError::Validation("name: must not be blank".to_string())),
    };
    if owner.pet_named_with(name, true).is_some() {
        return Err(CoreError::Conflict(format!("Pet named '{name}' already exists")));
    }
    if pet.birth_date().is_some_and(|born| born > today()) {
        return Err(CoreError::Validation(
            "birth_date: must not be in the future".to_string(),
        ));
    }
    Ok(())
}

//! The owner aggregate.
//!
//! An [`Owner`] exclusively owns its pets, and each [`Pet`] owns its visits.
//! Callers change the aggregate only through the mutators here: pets are
//! appended with [`Owner::add_pet`], visits are booked with
//! [`Owner::add_visit`], and pets are resolved by name or id with linear scans
//! over the (small) pet list.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::pet::Pet;
use crate::types::{DbId, Entity, Identity};
use crate::validation::{not_blank, TELEPHONE_PATTERN};
use crate::visit::Visit;

pub const PET_ID_REQUIRED: &str = "Pet identifier must not be null!";
pub const VISIT_REQUIRED: &str = "Visit must not be null!";
pub const INVALID_PET_ID: &str = "Invalid Pet identifier!";

/// Which part of an aggregate an id is being handed out for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Owner,
    Pet,
    Visit,
}

#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Validate)]
pub struct Owner {
    #[serde(rename = "id", default)]
    identity: Identity,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    first_name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    last_name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    address: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    city: String,
    #[validate(
        custom(function = "not_blank"),
        regex(path = *TELEPHONE_PATTERN, message = "must be exactly 10 digits")
    )]
    #[serde(default)]
    telephone: String,
    #[serde(default)]
    pets: Vec<Pet>,
}

impl Owner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: DbId) -> Result<Self, CoreError> {
        self.identity.assign(id)?;
        Ok(self)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    pub fn telephone(&self) -> &str {
        &self.telephone
    }

    pub fn set_telephone(&mut self, telephone: impl Into<String>) {
        self.telephone = telephone.into();
    }

    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Append `pet` if it has never been stored.
    ///
    /// Already persisted pets are ignored without error, so a form that
    /// re-submits known pets never duplicates them.
    pub fn add_pet(&mut self, pet: Pet) {
        if pet.is_new() {
            self.pets.push(pet);
        }
    }

    /// First pet whose name matches `name`, ignoring case.
    pub fn pet_named(&self, name: &str) -> Option<&Pet> {
        self.pet_named_with(name, false)
    }

    /// Like [`Owner::pet_named`]; with `ignore_new` only persisted pets match.
    pub fn pet_named_with(&self, name: &str, ignore_new: bool) -> Option<&Pet> {
        self.pets
            .iter()
            .filter(|pet| pet.has_name(name))
            .find(|pet| !ignore_new || !pet.is_new())
    }

    /// First persisted pet with the given id. Unsaved pets never match.
    pub fn pet_by_id(&self, id: DbId) -> Option<&Pet> {
        self.pets
            .iter()
            .find(|pet| pet.identity() == Identity::Saved(id))
    }

    pub(crate) fn pet_by_id_mut(&mut self, id: DbId) -> Option<&mut Pet> {
        self.pets
            .iter_mut()
            .find(|pet| pet.identity() == Identity::Saved(id))
    }

    /// Book `visit` for the persisted pet `pet_id`.
    ///
    /// Both arguments come straight from form input and may be missing.
    /// Fails with [`CoreError::InvalidArgument`] when either is absent or no
    /// persisted pet has that id; unsaved pets cannot receive visits here.
    pub fn add_visit(&mut self, pet_id: Option<DbId>, visit: Option<Visit>) -> Result<(), CoreError> {
        let pet_id = pet_id.ok_or_else(|| CoreError::InvalidArgument(PET_ID_REQUIRED.to_string()))?;
        let visit = visit.ok_or_else(|| CoreError::InvalidArgument(VISIT_REQUIRED.to_string()))?;
        let pet = self
            .pet_by_id_mut(pet_id)
            .ok_or_else(|| CoreError::InvalidArgument(INVALID_PET_ID.to_string()))?;
        pet.add_visit(visit);
        Ok(())
    }

    /// Replace the contact details with those of `other`, keeping pets and id.
    pub fn update_contact_details(&mut self, other: &Owner) {
        self.first_name.clone_from(&other.first_name);
        self.last_name.clone_from(&other.last_name);
        self.address.clone_from(&other.address);
        self.city.clone_from(&other.city);
        self.telephone.clone_from(&other.telephone);
    }

    /// Give every unsaved part of the aggregate an id from `next_id`.
    ///
    /// Called by the store on save. Already persisted parts keep their ids.
    pub fn assign_ids<F>(&mut self, mut next_id: F) -> Result<(), CoreError>
    where
        F: FnMut(EntityKind) -> Result<DbId, CoreError>,
    {
        if self.identity.is_new() {
            self.identity.assign(next_id(EntityKind::Owner)?)?;
        }
        for pet in self.pets.iter_mut() {
            if pet.is_new() {
                pet.assign_id(next_id(EntityKind::Pet)?)?;
            }
            for visit in pet.visits_mut() {
                if visit.is_new() {
                    visit.assign_id(next_id(EntityKind::Visit)?)?;
                }
            }
        }
        Ok(())
    }
}

impl Entity for Owner {
    fn identity(&self) -> Identity {
        self.identity
    }
}

/// Diagnostics view: identity first, then contact details. Pets are omitted.
impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("id", &self.id())
            .field("new", &self.is_new())
            .field("last_name", &self.last_name)
            .field("first_name", &self.first_name)
            .field("address", &self.address)
            .field("city", &self.city)
            .field("telephone", &self.telephone)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet_type::PetType;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn george() -> Owner {
        let mut owner = Owner::new().with_id(1).unwrap();
        owner.set_first_name("George");
        owner.set_last_name("Franklin");
        owner.set_address("110 W. Liberty St.");
        owner.set_city("Madison");
        owner.set_telephone("6085551023");
        owner
    }

    fn dog() -> PetType {
        PetType::new("dog").with_id(1).unwrap()
    }

    /// Unsaved "Max".
    fn max() -> Pet {
        let mut pet = Pet::new("Max");
        pet.set_pet_type(Some(dog()));
        pet.set_birth_date(NaiveDate::from_ymd_opt(2020, 1, 1));
        pet
    }

    /// Persisted "Bella" with id 2.
    fn bella() -> Pet {
        let mut pet = Pet::new("Bella").with_id(2).unwrap();
        pet.set_pet_type(Some(dog()));
        pet.set_birth_date(NaiveDate::from_ymd_opt(2019, 6, 15));
        pet
    }

    /// Owner holding [Max (unsaved), Bella (id 2)], as loaded then edited.
    fn george_with_pets() -> Owner {
        let mut owner = george();
        owner.add_pet(max());
        owner.pets.push(bella());
        owner
    }

    fn names(owner: &Owner) -> Vec<&str> {
        owner.pets().iter().filter_map(Pet::name).collect()
    }

    // -- accessors -----------------------------------------------------------

    #[test]
    fn getters_and_setters() {
        let mut owner = george();
        assert_eq!(owner.address(), "110 W. Liberty St.");
        assert_eq!(owner.city(), "Madison");
        assert_eq!(owner.telephone(), "6085551023");

        owner.set_address("123 Main St.");
        owner.set_city("Springfield");
        owner.set_telephone("5551234567");

        assert_eq!(owner.address(), "123 Main St.");
        assert_eq!(owner.city(), "Springfield");
        assert_eq!(owner.telephone(), "5551234567");
    }

    #[test]
    fn pets_initially_empty() {
        assert!(george().pets().is_empty());
    }

    // -- add_pet -------------------------------------------------------------

    #[test]
    fn add_new_pet() {
        let mut owner = george();
        owner.add_pet(max());
        assert_eq!(owner.pets().len(), 1);
        assert_eq!(owner.pets()[0], max());
    }

    #[test]
    fn add_multiple_new_pets_preserves_order() {
        let mut owner = george();
        owner.add_pet(max());
        owner.add_pet(Pet::new("Charlie"));
        assert_eq!(names(&owner), vec!["Max", "Charlie"]);
    }

    #[test]
    fn add_persisted_pet_is_noop() {
        let mut owner = george();
        owner.add_pet(bella());
        assert!(owner.pets().is_empty());
    }

    #[test]
    fn add_persisted_pet_twice_never_duplicates() {
        let mut owner = george_with_pets();
        let before = owner.pets().len();
        owner.add_pet(bella());
        owner.add_pet(bella());
        assert_eq!(owner.pets().len(), before);
        assert_eq!(names(&owner), vec!["Max", "Bella"]);
    }

    #[test]
    fn new_pets_with_same_name_are_both_added() {
        let mut owner = george();
        owner.add_pet(Pet::new("Max"));
        owner.add_pet(Pet::new("Max"));
        assert_eq!(owner.pets().len(), 2);
    }

    // -- pet_named -----------------------------------------------------------

    #[test]
    fn pet_named_is_case_insensitive() {
        let owner = george_with_pets();
        let exact = owner.pet_named("Max");
        assert!(exact.is_some());
        assert_eq!(owner.pet_named("max"), exact);
        assert_eq!(owner.pet_named("MAX"), exact);
    }

    #[test]
    fn pet_named_returns_new_pets_by_default() {
        let owner = george_with_pets();
        let pet = owner.pet_named_with("Max", false).unwrap();
        assert!(pet.is_new());
    }

    #[test]
    fn pet_named_ignoring_new_skips_unsaved() {
        let owner = george_with_pets();
        assert_eq!(owner.pet_named_with("Max", true), None);
        assert_eq!(owner.pet_named_with("Bella", true).and_then(Pet::id), Some(2));
    }

    #[test]
    fn pet_named_ignoring_new_falls_through_to_later_persisted_match() {
        let mut owner = george();
        owner.add_pet(Pet::new("Rosy"));
        owner.pets.push(Pet::new("rosy").with_id(8).unwrap());
        assert_eq!(owner.pet_named_with("ROSY", true).and_then(Pet::id), Some(8));
        assert!(owner.pet_named_with("ROSY", false).unwrap().is_new());
    }

    #[test]
    fn pet_named_misses_return_none() {
        let owner = george_with_pets();
        assert_eq!(owner.pet_named("Lucky"), None);
        assert_eq!(owner.pet_named(""), None);
    }

    #[test]
    fn unnamed_pets_are_skipped() {
        let mut owner = george();
        owner.add_pet(Pet::default());
        owner.add_pet(Pet::new("Leo"));
        assert_eq!(owner.pet_named("Leo").and_then(Pet::name), Some("Leo"));
        assert_eq!(owner.pet_named(""), None);
    }

    #[test]
    fn first_match_wins() {
        let mut owner = george();
        owner.pets.push(Pet::new("Jewel").with_id(3).unwrap());
        owner.pets.push(Pet::new("jewel").with_id(4).unwrap());
        assert_eq!(owner.pet_named("JEWEL").and_then(Pet::id), Some(3));
    }

    // -- pet_by_id -----------------------------------------------------------

    #[test]
    fn pet_by_id_finds_persisted_pet() {
        let owner = george_with_pets();
        assert_eq!(owner.pet_by_id(2).and_then(Pet::name), Some("Bella"));
    }

    #[test]
    fn pet_by_id_never_returns_new_pet() {
        let owner = george_with_pets();
        assert_eq!(owner.pet_by_id(1), None);
        for id in [-1, 0, 1, 3, DbId::MAX] {
            assert!(owner.pet_by_id(id).map_or(true, |pet| !pet.is_new()));
        }
    }

    // -- add_visit -----------------------------------------------------------

    #[test]
    fn add_visit_to_persisted_pet() {
        let mut owner = george_with_pets();
        let visit = Visit::on(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "checkup");
        owner.add_visit(Some(2), Some(visit.clone())).unwrap();

        let bella = owner.pet_by_id(2).unwrap();
        assert_eq!(bella.visits(), &[visit]);
        assert!(owner.pet_named("Max").unwrap().visits().is_empty());
    }

    #[test]
    fn add_visit_without_pet_id_fails() {
        let mut owner = george_with_pets();
        let err = owner.add_visit(None, Some(Visit::new())).unwrap_err();
        assert_matches!(&err, CoreError::InvalidArgument(msg) if msg.contains("Pet identifier"));
    }

    #[test]
    fn add_visit_without_visit_fails() {
        let mut owner = george_with_pets();
        let err = owner.add_visit(Some(2), None).unwrap_err();
        assert_matches!(&err, CoreError::InvalidArgument(msg) if msg.contains("Visit"));
    }

    #[test]
    fn add_visit_checks_pet_id_before_visit() {
        let mut owner = george_with_pets();
        let err = owner.add_visit(None, None).unwrap_err();
        assert_eq!(err, CoreError::InvalidArgument(PET_ID_REQUIRED.to_string()));
    }

    #[test]
    fn add_visit_with_unknown_pet_id_fails() {
        let mut owner = george_with_pets();
        let err = owner.add_visit(Some(99), Some(Visit::new())).unwrap_err();
        assert_matches!(&err, CoreError::InvalidArgument(msg) if msg.contains("Invalid Pet identifier"));
    }

    #[test]
    fn add_visit_to_unsaved_pet_fails() {
        let mut owner = george();
        owner.add_pet(max());
        assert!(owner.add_visit(Some(0), Some(Visit::new())).is_err());
        assert!(owner.pets()[0].visits().is_empty());
    }

    // -- assign_ids ----------------------------------------------------------

    #[test]
    fn assign_ids_covers_unsaved_parts_only() {
        let mut owner = george_with_pets();
        owner.add_visit(Some(2), Some(Visit::new())).unwrap();

        let mut handed_out = Vec::new();
        let mut next = 100;
        owner
            .assign_ids(|kind| {
                handed_out.push(kind);
                next += 1;
                Ok(next)
            })
            .unwrap();

        assert_eq!(handed_out, vec![EntityKind::Pet, EntityKind::Visit]);
        assert_eq!(owner.id(), Some(1));
        assert_eq!(owner.pet_named("Max").and_then(Pet::id), Some(101));
        assert_eq!(owner.pet_by_id(2).unwrap().visits()[0].id(), Some(102));
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn complete_owner_validates() {
        assert!(george().validate().is_ok());
    }

    #[test]
    fn blank_fields_fail_validation() {
        let mut owner = george();
        owner.set_city("  ");
        let errors = owner.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("city"));
    }

    #[test]
    fn bad_telephone_fails_validation() {
        let mut owner = george();
        owner.set_telephone("608-555-1023");
        let errors = owner.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("telephone"));
    }

    #[test]
    fn empty_owner_reports_every_required_field() {
        let errors = Owner::new().validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["first_name", "last_name", "address", "city", "telephone"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }

    // -- debug representation -----------------------------------------------

    #[test]
    fn debug_lists_fields_in_order() {
        let rendered = format!("{:?}", george());
        assert_eq!(
            rendered,
            "Owner { id: Some(1), new: false, last_name: \"Franklin\", first_name: \"George\", \
             address: \"110 W. Liberty St.\", city: \"Madison\", telephone: \"6085551023\" }"
        );
    }

    #[test]
    fn debug_marks_new_owner() {
        let rendered = format!("{:?}", Owner::new());
        assert!(rendered.starts_with("Owner { id: None, new: true"));
    }

    // -- serde ---------------------------------------------------------------

    #[test]
    fn round_trip_preserves_contact_details() {
        let owner = george_with_pets();
        let json = serde_json::to_string(&owner).unwrap();
        let restored: Owner = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id(), Some(1));
        assert_eq!(restored.first_name(), "George");
        assert_eq!(restored.last_name(), "Franklin");
        assert_eq!(restored.address(), "110 W. Liberty St.");
        assert_eq!(restored.city(), "Madison");
        assert_eq!(restored.telephone(), "6085551023");
        assert_eq!(restored, owner);
    }

    #[test]
    fn form_payload_without_id_is_new() {
        let owner: Owner = serde_json::from_str(
            r#"{"first_name":"Jean","last_name":"Coleman","address":"105 N. Lake St.",
                "city":"Monona","telephone":"6085552654"}"#,
        )
        .unwrap();
        assert!(owner.is_new());
        assert!(owner.pets().is_empty());
        assert!(owner.validate().is_ok());
    }

    #[test]
    fn payload_with_negative_id_is_rejected() {
        let owner = serde_json::from_str::<Owner>(
            r#"{"id":-5,"first_name":"Jean","last_name":"Coleman","address":"105 N. Lake St.",
                "city":"Monona","telephone":"6085552654"}"#,
        );
        assert!(owner.is_err());

        let nested = serde_json::from_str::<Owner>(r#"{"id":1,"pets":[{"id":-3,"name":"Max"}]}"#);
        assert!(nested.is_err());
    }

    #[test]
    fn with_id_rejects_negative_ids() {
        assert_matches!(Owner::new().with_id(-1), Err(CoreError::InvalidArgument(_)));
        assert_matches!(Pet::new("x").with_id(-3), Err(CoreError::InvalidArgument(_)));
    }
}

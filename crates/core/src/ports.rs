//! Collaborators the domain depends on but does not implement.
//!
//! The store assigns identifiers and loads/saves whole aggregates; the pet
//! type lookup supplies reference data to the formatter.

use crate::error::CoreError;
use crate::owner::Owner;
use crate::pet_type::PetType;
use crate::types::DbId;
use crate::vet::Vet;

pub trait OwnerRepository {
    /// Load the whole aggregate (pets and visits included).
    fn find_by_id(&self, id: DbId) -> Result<Option<Owner>, CoreError>;

    /// Owners whose last name starts with `prefix`. An empty prefix matches
    /// everyone.
    fn find_by_last_name_prefix(&self, prefix: &str) -> Result<Vec<Owner>, CoreError>;

    /// Store the aggregate, assigning ids to every unsaved part of it.
    fn save(&mut self, owner: &mut Owner) -> Result<(), CoreError>;
}

/// Source of the known pet types.
pub trait PetTypeLookup {
    fn find_pet_types(&self) -> Vec<PetType>;
}

pub trait VetRepository {
    fn find_all(&self) -> Result<Vec<Vet>, CoreError>;
}

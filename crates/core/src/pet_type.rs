//! Pet type reference data and its text form.
//!
//! Forms carry a pet type as its display name; [`PetTypeFormatter`] turns the
//! name back into the stored record using the known types supplied by a
//! [`PetTypeLookup`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ports::PetTypeLookup;
use crate::types::{DbId, Entity, Identity};

/// Printed in place of a missing pet type name.
pub const MISSING_NAME_PLACEHOLDER: &str = "<null>";

/// A named category such as "dog" or "cat". Shared by many pets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PetType {
    #[serde(rename = "id", default)]
    identity: Identity,
    #[serde(default)]
    name: Option<String>,
}

impl PetType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::Unsaved,
            name: Some(name.into()),
        }
    }

    pub fn with_id(mut self, id: DbId) -> Result<Self, CoreError> {
        self.identity.assign(id)?;
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    pub fn assign_id(&mut self, id: DbId) -> Result<(), CoreError> {
        self.identity.assign(id)
    }
}

impl Entity for PetType {
    fn identity(&self) -> Identity {
        self.identity
    }
}

/// Display text for a pet type: its name or [`MISSING_NAME_PLACEHOLDER`].
pub fn print_pet_type(pet_type: &PetType) -> String {
    pet_type
        .name()
        .unwrap_or(MISSING_NAME_PLACEHOLDER)
        .to_string()
}

/// Find the known type whose name equals `text` exactly (case-sensitive).
pub fn parse_pet_type(known: &[PetType], text: &str) -> Result<PetType, CoreError> {
    known
        .iter()
        .find(|pet_type| pet_type.name() == Some(text))
        .cloned()
        .ok_or_else(|| CoreError::Parse {
            text: text.to_string(),
        })
}

/// Converts between a pet type and its form text.
pub struct PetTypeFormatter<'a, L: PetTypeLookup + ?Sized> {
    types: &'a L,
}

impl<'a, L: PetTypeLookup + ?Sized> PetTypeFormatter<'a, L> {
    pub fn new(types: &'a L) -> Self {
        Self { types }
    }

    pub fn print(&self, pet_type: &PetType) -> String {
        print_pet_type(pet_type)
    }

    /// Resolve form text against the currently known pet types.
    pub fn parse(&self, text: &str) -> Result<PetType, CoreError> {
        parse_pet_type(&self.types.find_pet_types(), text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

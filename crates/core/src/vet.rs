//! Veterinarians and their specialties.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Entity, Identity};

/// A named skill category such as "radiology".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Specialty {
    #[serde(rename = "id", default)]
    identity: Identity,
    name: String,
}

impl Specialty {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::Unsaved,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: DbId) -> Result<Self, CoreError> {
        self.identity.assign(id)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Specialty {
    fn identity(&self) -> Identity {
        self.identity
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vet {
    #[serde(rename = "id", default)]
    identity: Identity,
    first_name: String,
    last_name: String,
    /// Sorted by name, one entry per name.
    #[serde(default, deserialize_with = "specialty_set")]
    specialties: Vec<Specialty>,
}

impl Vet {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            identity: Identity::Unsaved,
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialties: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: DbId) -> Result<Self, CoreError> {
        self.identity.assign(id)?;
        Ok(self)
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Specialties ordered by name.
    pub fn specialties(&self) -> &[Specialty] {
        &self.specialties
    }

    pub fn nr_of_specialties(&self) -> usize {
        self.specialties.len()
    }

    /// Add `specialty` unless the vet already has one with that name.
    pub fn add_specialty(&mut self, specialty: Specialty) {
        match self
            .specialties
            .binary_search_by(|existing| existing.name().cmp(specialty.name()))
        {
            Ok(_) => {}
            Err(at) => self.specialties.insert(at, specialty),
        }
    }

    pub fn assign_id(&mut self, id: DbId) -> Result<(), CoreError> {
        self.identity.assign(id)
    }
}

impl Entity for Vet {
    fn identity(&self) -> Identity {
        self.identity
    }
}

/// Accept specialties in any order; keep the first of each name.
fn specialty_set<'de, D>(deserializer: D) -> Result<Vec<Specialty>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut specialties = Vec::<Specialty>::deserialize(deserializer)?;
    specialties.sort_by(|a, b| a.name().cmp(b.name()));
    specialties.dedup_by(|later, earlier| later.name() == earlier.name());
    Ok(specialties)
}

//! A named, typed animal and its visit history.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::pet_type::PetType;
use crate::types::{DbId, Entity, Identity};
use crate::visit::Visit;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pet {
    #[serde(rename = "id", default)]
    identity: Identity,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birth_date: Option<NaiveDate>,
    #[serde(rename = "type", default)]
    pet_type: Option<PetType>,
    /// Kept in date order; equal dates keep insertion order.
    #[serde(default, deserialize_with = "visits_by_date")]
    visits: Vec<Visit>,
}

impl Pet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: DbId) -> Result<Self, CoreError> {
        self.identity.assign(id)?;
        Ok(self)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn set_birth_date(&mut self, birth_date: Option<NaiveDate>) {
        self.birth_date = birth_date;
    }

    pub fn pet_type(&self) -> Option<&PetType> {
        self.pet_type.as_ref()
    }

    pub fn set_pet_type(&mut self, pet_type: Option<PetType>) {
        self.pet_type = pet_type;
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Attach a visit directly, for callers that already resolved the pet.
    ///
    /// The visit lands after every visit dated on or before it.
    pub fn add_visit(&mut self, visit: Visit) {
        let at = self
            .visits
            .partition_point(|existing| existing.date() <= visit.date());
        self.visits.insert(at, visit);
    }

    pub fn assign_id(&mut self, id: DbId) -> Result<(), CoreError> {
        self.identity.assign(id)
    }

    pub(crate) fn visits_mut(&mut self) -> impl Iterator<Item = &mut Visit> {
        self.visits.iter_mut()
    }

    /// Case-insensitive name comparison. An unnamed pet matches nothing.
    pub(crate) fn has_name(&self, name: &str) -> bool {
        match self.name.as_deref() {
            Some(own) => eq_ignore_case(own, name),
            None => false,
        }
    }
}

impl Entity for Pet {
    fn identity(&self) -> Identity {
        self.identity
    }
}

/// Accept visits in any order and store them sorted by date.
fn visits_by_date<'de, D>(deserializer: D) -> Result<Vec<Visit>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut visits = Vec::<Visit>::deserialize(deserializer)?;
    visits.sort_by_key(Visit::date);
    Ok(visits)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

//! A dated note attached to exactly one pet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Entity, Identity};
use crate::validation::not_blank;

/// Today's date in the clinic's local time zone.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Visit {
    #[serde(rename = "id", default)]
    identity: Identity,
    #[serde(default = "today")]
    date: NaiveDate,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    description: String,
}

impl Default for Visit {
    fn default() -> Self {
        Self::new()
    }
}

impl Visit {
    /// An empty visit dated today.
    pub fn new() -> Self {
        Self {
            identity: Identity::Unsaved,
            date: today(),
            description: String::new(),
        }
    }

    /// A visit on `date` with the given description.
    pub fn on(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            identity: Identity::Unsaved,
            date,
            description: description.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Record the id handed out by the store.
    pub fn assign_id(&mut self, id: DbId) -> Result<(), CoreError> {
        self.identity.assign(id)
    }

    /// Builder-style id assignment, for loading stored visits.
    pub fn with_id(mut self, id: DbId) -> Result<Self, CoreError> {
        self.identity.assign(id)?;
        Ok(self)
    }
}

impl Entity for Visit {
    fn identity(&self) -> Identity {
        self.identity
    }
}

//! Identifier convention shared by every clinic entity.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Storage-assigned primary key. Always non-negative.
pub type DbId = i64;

/// Persistence state of an entity.
///
/// An entity is `Unsaved` until the store assigns it an id; after that it is
/// `Saved` for the rest of its life. Serialized as an optional integer, so a
/// form payload without an `id` deserializes to `Unsaved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<DbId>", into = "Option<DbId>")]
pub enum Identity {
    #[default]
    Unsaved,
    Saved(DbId),
}

impl Identity {
    /// The assigned id, if any.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Identity::Unsaved => None,
            Identity::Saved(id) => Some(*id),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, Identity::Unsaved)
    }

    /// Record the id handed out by the store.
    ///
    /// Assigning the id an entity already carries is a no-op. A saved entity
    /// never takes a different id.
    pub fn assign(&mut self, id: DbId) -> Result<(), CoreError> {
        check_id(id)?;
        match *self {
            Identity::Unsaved => {
                *self = Identity::Saved(id);
                Ok(())
            }
            Identity::Saved(current) if current == id => Ok(()),
            Identity::Saved(current) => Err(CoreError::Conflict(format!(
                "Identifier {current} cannot be replaced with {id}"
            ))),
        }
    }
}

fn check_id(id: DbId) -> Result<DbId, CoreError> {
    if id < 0 {
        return Err(CoreError::InvalidArgument(format!(
            "Identifier must be non-negative, got {id}"
        )));
    }
    Ok(id)
}

impl TryFrom<Option<DbId>> for Identity {
    type Error = CoreError;

    fn try_from(id: Option<DbId>) -> Result<Self, Self::Error> {
        match id {
            Some(id) => Ok(Identity::Saved(check_id(id)?)),
            None => Ok(Identity::Unsaved),
        }
    }
}

impl From<Identity> for Option<DbId> {
    fn from(identity: Identity) -> Self {
        identity.id()
    }
}

/// Anything carrying an [`Identity`].
pub trait Entity {
    fn identity(&self) -> Identity;

    fn id(&self) -> Option<DbId> {
        self.identity().id()
    }

    /// `true` until the store has assigned an id.
    fn is_new(&self) -> bool {
        self.identity().is_new()
    }
}

use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A required reference was missing or did not resolve.
    #[error("{0}")]
    InvalidArgument(String),

    /// Text that names no known pet type.
    #[error("type not found: {text}")]
    Parse { text: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}

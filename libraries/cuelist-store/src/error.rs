/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StoreError {
    /// Schema migration error
    #[error("migration error: {0}")]
    Migration(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A row violating the stored-shape invariants (bad timestamp, bad tag
    /// encoding, playlist id without position or vice versa)
    #[error("corrupt row: {0}")]
    Corrupt(String),

    /// An operation the target collection cannot express
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StoreError> for cuelist_core::CuelistError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => cuelist_core::CuelistError::NotFound { entity, id },
            other => cuelist_core::CuelistError::storage(other.to_string()),
        }
    }
}

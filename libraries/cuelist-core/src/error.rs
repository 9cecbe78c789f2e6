/// Core error types for Cuelist
use thiserror::Error;

/// Result type alias using `CuelistError`
pub type Result<T> = std::result::Result<T, CuelistError>;

/// Core error type for Cuelist
#[derive(Error, Debug)]
pub enum CuelistError {
    /// Input rejected before any store call; no side effect occurred
    #[error("validation error: {0}")]
    Validation(String),

    /// Entity not found (also covers share links to private playlists)
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Storage-related errors (network, permission, query failure)
    #[error("storage error: {0}")]
    Storage(String),

    /// An atomic batch was rejected as a whole; nothing was applied
    #[error("commit rejected: {0}")]
    CommitRejected(String),

    /// External configuration absent or malformed; fatal to the session
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CuelistError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

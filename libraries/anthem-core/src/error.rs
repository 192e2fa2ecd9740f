/// Core error types for Anthem
use thiserror::Error;

use crate::types::SongId;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Anthem
#[derive(Error, Debug)]
pub enum CoreError {
    /// Entity not found
    #[error("Song not found: {0}")]
    SongNotFound(SongId),

    /// A field failed validation
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

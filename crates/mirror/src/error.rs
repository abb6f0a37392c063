//! Mirror error types.

use thiserror::Error;

/// Errors that can occur while publishing or reading the mirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A collection could not be converted to or from its published form.
    #[error("Mirror serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;

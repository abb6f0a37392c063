use thiserror::Error;

use crate::{RecordId, Version};

/// Errors that can occur when interacting with the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored version did not match the version the writer expected.
    #[error(
        "Concurrency conflict for {kind} {id}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        kind: String,
        id: RecordId,
        expected: Version,
        actual: Version,
    },

    /// A sequence counter left the representable range.
    #[error("Sequence counter for {kind} is out of range")]
    CounterOutOfRange { kind: String },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Domain error types.

use common::RecordId;
use mirror::MirrorError;
use record_store::StoreError;
use thiserror::Error;

use crate::quotation::{ItemId, ValidationFault};

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The entity broke one or more validation rules. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationFault),

    /// No record with this ID exists.
    #[error("Record not found: {kind} with id {id}")]
    NotFound { kind: &'static str, id: RecordId },

    /// The record has no line item with this ID.
    #[error("Item {item_id} not found in record {id}")]
    ItemNotFound { id: RecordId, item_id: ItemId },

    /// The record already has a line item with this ID.
    #[error("Item {item_id} already exists in record {id}")]
    DuplicateItem { id: RecordId, item_id: ItemId },

    /// An error occurred in the record store.
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// The read mirror could not be refreshed.
    #[error("Mirror error: {0}")]
    Mirror(#[from] MirrorError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    /// Returns true if the record did not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }

    /// Returns true if the write lost a race against a concurrent writer.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Store(StoreError::ConcurrencyConflict { .. })
        )
    }
}

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{PendingRecord, RecordId, Result, StoredRecord, Version};

/// Options for saving a record.
#[derive(Debug, Clone, Default)]
pub struct SaveOptions {
    /// Expected current version of the record for optimistic concurrency control.
    /// If None, no version check is performed and the save always wins.
    pub expected_version: Option<Version>,
}

impl SaveOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the record to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Creates options expecting the record to not exist yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }
}

/// Durable storage for entity records, partitioned by entity kind.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes a record, returning it as stored.
    ///
    /// If `options.expected_version` is set, the save fails with
    /// `ConcurrencyConflict` when the record's current version differs.
    /// The stored version is the previous version plus one.
    async fn save(&self, record: PendingRecord, options: SaveOptions) -> Result<StoredRecord>;

    /// Loads one record. Returns None if it doesn't exist.
    async fn load(&self, kind: &str, id: RecordId) -> Result<Option<StoredRecord>>;

    /// Loads every record of a kind.
    async fn load_all(&self, kind: &str) -> Result<Vec<StoredRecord>>;

    /// Deletes a record. Deleting a missing record is not an error.
    async fn delete(&self, kind: &str, id: RecordId) -> Result<()>;
}

/// Per-kind monotonic counters backing business-facing sequence numbers.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Atomically advances the counter for `kind` and returns the new value.
    ///
    /// The first call for a kind returns `start`. The read and the increment
    /// happen in one critical section, so overlapping callers never observe
    /// the same value.
    async fn next_value(&self, kind: &str, start: u64) -> Result<u64>;
}

/// Extension trait providing typed access on top of [`RecordStore`].
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    /// Loads a record and decodes it, together with its stored version.
    async fn load_as<T: DeserializeOwned + Send>(
        &self,
        kind: &str,
        id: RecordId,
    ) -> Result<Option<(T, Version)>> {
        match self.load(kind, id).await? {
            Some(record) => Ok(Some((record.decode()?, record.version))),
            None => Ok(None),
        }
    }

    /// Checks if a record exists.
    async fn exists(&self, kind: &str, id: RecordId) -> Result<bool> {
        Ok(self.load(kind, id).await?.is_some())
    }
}

// Blanket implementation for all RecordStore implementations
impl<T: RecordStore + ?Sized> RecordStoreExt for T {}

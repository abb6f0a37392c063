use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::RecordId;

/// Version stamp of a stored record, used for optimistic concurrency control.
///
/// A record that has never been saved is at version 0; the first save
/// produces version 1 and every later save increments it by one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) of a record that does not exist yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the first version (1), produced by the first save.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// A record about to be written: the entity serialized to JSON plus its key.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRecord {
    /// The entity type (e.g. "quotation").
    pub kind: String,

    /// The record's identifier.
    pub id: RecordId,

    /// The entity body as JSON.
    pub payload: serde_json::Value,
}

impl PendingRecord {
    /// Creates a pending record from a raw JSON payload.
    pub fn new(kind: impl Into<String>, id: RecordId, payload: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            id,
            payload,
        }
    }

    /// Creates a pending record by serializing an entity.
    pub fn from_entity<T: Serialize>(
        kind: impl Into<String>,
        id: RecordId,
        entity: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(kind, id, serde_json::to_value(entity)?))
    }
}

/// A record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// The entity type (e.g. "quotation").
    pub kind: String,

    /// The record's identifier.
    pub id: RecordId,

    /// Version after the last save.
    pub version: Version,

    /// When the record was last written.
    pub stored_at: DateTime<Utc>,

    /// The entity body as JSON.
    pub payload: serde_json::Value,
}

impl StoredRecord {
    /// Deserializes the payload into an entity.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

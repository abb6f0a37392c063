//! Core trait for persisted entity types.

use chrono::{DateTime, Utc};
use common::RecordId;
use serde::{Serialize, de::DeserializeOwned};

use crate::sequence::SequenceNumber;

/// Trait for entity types kept in the record store.
///
/// Each type declares the attributes that participate in "all fields"
/// search. There is no runtime attribute enumeration: a field that is not
/// listed in [`Record::search_fields`] is never matched by a search across
/// all fields.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync {
    /// Returns the entity type name.
    ///
    /// Used as the store partition and as the sequence counter key.
    fn kind() -> &'static str;

    /// Returns the names of the searchable attributes.
    fn search_fields() -> &'static [&'static str];

    /// Returns the record's unique identifier.
    fn id(&self) -> RecordId;

    /// Returns the business-facing sequence number.
    fn sequence_number(&self) -> &SequenceNumber;

    /// Returns when the record was created.
    fn created_at(&self) -> DateTime<Utc>;

    /// Returns an attribute coerced to text, or None if the attribute is
    /// unknown or has no value.
    fn field_text(&self, field: &str) -> Option<String>;
}

//! Quotation entity.

use chrono::{DateTime, Utc};
use common::RecordId;
use record_store::Version;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::sequence::SequenceNumber;

use super::{ItemId, LineItem, NewQuotation, QuotationPatch, QuotationStatus, calculate_total};

const SEARCH_FIELDS: &[&str] = &[
    "id",
    "sequence_number",
    "status",
    "parent_ref",
    "price_list_ref",
    "title",
    "customer_name",
    "notes",
    "total_amount",
    "created_at",
    "last_modified_at",
];

/// A quotation issued under a project, priced from a price list.
///
/// `total_amount` is derived: it is recomputed from `items` whenever the
/// quotation is built or patched and is never set directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    id: RecordId,
    sequence_number: SequenceNumber,
    created_at: DateTime<Utc>,
    last_modified_at: DateTime<Utc>,
    status: QuotationStatus,
    parent_ref: String,
    price_list_ref: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    customer_name: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    items: Vec<LineItem>,
    total_amount: f64,

    /// Store version this copy was read at.
    #[serde(default)]
    version: Version,
}

impl Quotation {
    /// Builds a quotation from creation input, applying the defaults.
    pub fn from_new(
        id: RecordId,
        sequence_number: SequenceNumber,
        new: NewQuotation,
        now: DateTime<Utc>,
    ) -> Self {
        let total_amount = calculate_total(&new.items);
        Self {
            id,
            sequence_number,
            created_at: now,
            last_modified_at: now,
            status: new.status.unwrap_or_default(),
            parent_ref: new.parent_ref,
            price_list_ref: new.price_list_ref,
            title: new.title,
            customer_name: new.customer_name,
            notes: new.notes,
            items: new.items,
            total_amount,
            version: Version::initial(),
        }
    }
}

// Query methods
impl Quotation {
    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> DateTime<Utc> {
        self.last_modified_at
    }

    pub fn status(&self) -> QuotationStatus {
        self.status
    }

    pub fn parent_ref(&self) -> &str {
        &self.parent_ref
    }

    pub fn price_list_ref(&self) -> &str {
        &self.price_list_ref
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the line items in order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns an item by ID.
    pub fn get_item(&self, item_id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Returns the store version this copy was read at.
    pub fn version(&self) -> Version {
        self.version
    }
}

// Mutation, used by the service only
impl Quotation {
    pub(crate) fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Merges `patch` over this quotation, refreshes the modification time
    /// and recomputes the total.
    pub(crate) fn apply_patch(&mut self, patch: QuotationPatch, now: DateTime<Utc>) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(parent_ref) = patch.parent_ref {
            self.parent_ref = parent_ref;
        }
        if let Some(price_list_ref) = patch.price_list_ref {
            self.price_list_ref = price_list_ref;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(customer_name) = patch.customer_name {
            self.customer_name = customer_name;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        self.total_amount = calculate_total(&self.items);
        self.last_modified_at = now;
    }
}

impl Record for Quotation {
    fn kind() -> &'static str {
        "quotation"
    }

    fn search_fields() -> &'static [&'static str] {
        SEARCH_FIELDS
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn sequence_number(&self) -> &SequenceNumber {
        &self.sequence_number
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn field_text(&self, field: &str) -> Option<String> {
        match field {
            "id" => Some(self.id.to_string()),
            "sequence_number" => Some(self.sequence_number.to_string()),
            "status" => Some(self.status.to_string()),
            "parent_ref" => Some(self.parent_ref.clone()),
            "price_list_ref" => Some(self.price_list_ref.clone()),
            "title" => self.title.clone(),
            "customer_name" => self.customer_name.clone(),
            "notes" => self.notes.clone(),
            "total_amount" => Some(self.total_amount.to_string()),
            "created_at" => Some(self.created_at.to_rfc3339()),
            "last_modified_at" => Some(self.last_modified_at.to_rfc3339()),
            _ => None,
        }
    }
}

//! Inputs for creating and changing quotations.

use serde::{Deserialize, Deserializer, Serialize};

use super::{LineItem, QuotationStatus};

/// Caller-supplied fields for a new quotation.
///
/// Anything left out takes the creation default: draft status, no items,
/// zero total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewQuotation {
    pub parent_ref: String,
    pub price_list_ref: String,
    pub status: Option<QuotationStatus>,
    pub title: Option<String>,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
}

impl NewQuotation {
    /// Creates the input for a quotation under a project using a price list.
    pub fn new(parent_ref: impl Into<String>, price_list_ref: impl Into<String>) -> Self {
        Self {
            parent_ref: parent_ref.into(),
            price_list_ref: price_list_ref.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: QuotationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_customer(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(customer_name.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_items(mut self, items: Vec<LineItem>) -> Self {
        self.items = items;
        self
    }
}

/// A shallow patch over an existing quotation.
///
/// Each field that is set replaces the stored value wholesale; unset fields
/// are left alone. Identity, sequence number and creation time cannot be
/// patched.
///
/// The optional text fields take two levels: `None` leaves the value alone,
/// `Some(None)` clears it. In JSON an absent key leaves it and an explicit
/// `null` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationPatch {
    pub status: Option<QuotationStatus>,
    pub parent_ref: Option<String>,
    pub price_list_ref: Option<String>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<Option<String>>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    pub items: Option<Vec<LineItem>>,
}

impl QuotationPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// A patch replacing only the item list.
    pub fn items(items: Vec<LineItem>) -> Self {
        Self {
            items: Some(items),
            ..Default::default()
        }
    }

    pub fn status(mut self, status: QuotationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn parent_ref(mut self, parent_ref: impl Into<String>) -> Self {
        self.parent_ref = Some(parent_ref.into());
        self
    }

    pub fn price_list_ref(mut self, price_list_ref: impl Into<String>) -> Self {
        self.price_list_ref = Some(price_list_ref.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    pub fn clear_title(mut self) -> Self {
        self.title = Some(None);
        self
    }

    pub fn customer_name(mut self, customer_name: impl Into<String>) -> Self {
        self.customer_name = Some(Some(customer_name.into()));
        self
    }

    pub fn clear_customer_name(mut self) -> Self {
        self.customer_name = Some(None);
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(Some(notes.into()));
        self
    }

    pub fn clear_notes(mut self) -> Self {
        self.notes = Some(None);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Deserializes a present field, `null` included, as `Some`. Absent fields
/// fall back to the container default of `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_quotation_defaults() {
        let new = NewQuotation::new("PC-1", "PL-1");
        assert_eq!(new.parent_ref, "PC-1");
        assert_eq!(new.price_list_ref, "PL-1");
        assert!(new.status.is_none());
        assert!(new.items.is_empty());
    }

    #[test]
    fn test_new_quotation_from_partial_json() {
        let new: NewQuotation = serde_json::from_str(r#"{"parent_ref": "PC-9"}"#).unwrap();
        assert_eq!(new.parent_ref, "PC-9");
        assert_eq!(new.price_list_ref, "");
    }

    #[test]
    fn test_patch_builders() {
        let patch = QuotationPatch::new()
            .status(QuotationStatus::Pending)
            .title("Roof repair");
        assert_eq!(patch.status, Some(QuotationStatus::Pending));
        assert_eq!(patch.title, Some(Some("Roof repair".to_string())));
        assert!(patch.items.is_none());
        assert!(!patch.is_empty());
        assert!(QuotationPatch::new().is_empty());
    }

    #[test]
    fn test_patch_clears_optional_text() {
        let patch = QuotationPatch::new().clear_notes();
        assert_eq!(patch.notes, Some(None));
        assert!(patch.title.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_json_null_clears_and_absent_keeps() {
        let patch: QuotationPatch =
            serde_json::from_str(r#"{"title": null, "notes": "call back"}"#).unwrap();
        assert_eq!(patch.title, Some(None));
        assert_eq!(patch.notes, Some(Some("call back".to_string())));
        assert_eq!(patch.customer_name, None);
    }
}

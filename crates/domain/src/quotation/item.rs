//! Quotation line items.

use common::{NumericInput, lenient_product};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a line item within a quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates a new random item ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an item ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line on a quotation.
///
/// Quantity and unit price are kept exactly as entered; they may be missing
/// or not numeric. They are only coerced when a total is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The item identifier.
    #[serde(default)]
    pub id: ItemId,

    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Quantity as entered.
    #[serde(default)]
    pub quantity: Option<NumericInput>,

    /// Price per unit as entered.
    #[serde(default)]
    pub unit_price: Option<NumericInput>,
}

impl LineItem {
    /// Creates a new line item with a fresh ID.
    pub fn new(quantity: impl Into<NumericInput>, unit_price: impl Into<NumericInput>) -> Self {
        Self {
            id: ItemId::new(),
            description: None,
            quantity: Some(quantity.into()),
            unit_price: Some(unit_price.into()),
        }
    }

    /// Creates a line item with no quantity or price yet.
    pub fn blank() -> Self {
        Self {
            id: ItemId::new(),
            description: None,
            quantity: None,
            unit_price: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `quantity * unit_price`, with missing or malformed values
    /// counting as zero.
    pub fn line_total(&self) -> f64 {
        lenient_product(self.quantity.as_ref(), self.unit_price.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_new_creates_unique_ids() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_line_total() {
        assert_eq!(LineItem::new(2, 15.5).line_total(), 31.0);
        assert_eq!(LineItem::new("3", "2.5").line_total(), 7.5);
    }

    #[test]
    fn test_line_total_is_lenient() {
        assert_eq!(LineItem::new(1, "abc").line_total(), 0.0);
        assert_eq!(LineItem::blank().line_total(), 0.0);
    }

    #[test]
    fn test_deserialize_partial_item() {
        let item: LineItem = serde_json::from_str(r#"{"quantity": "4"}"#).unwrap();
        assert_eq!(item.quantity, Some(NumericInput::Text("4".to_string())));
        assert!(item.unit_price.is_none());
        assert_eq!(item.line_total(), 0.0);
    }

    #[test]
    fn test_with_description() {
        let item = LineItem::new(1, 10.0).with_description("Site survey");
        assert_eq!(item.description.as_deref(), Some("Site survey"));
    }
}

//! Quotation status.

use serde::{Deserialize, Serialize};

/// The status of a quotation.
///
/// Every quotation starts as a draft. Status is set freely through updates;
/// there is no enforced transition order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum QuotationStatus {
    /// Being prepared.
    #[default]
    Draft,

    /// Sent to the customer, awaiting a decision.
    Pending,

    /// Accepted by the customer.
    Approved,

    /// Rejected by the customer.
    Declined,
}

impl QuotationStatus {
    /// Every status, in declaration order.
    pub const ALL: [QuotationStatus; 4] = [
        QuotationStatus::Draft,
        QuotationStatus::Pending,
        QuotationStatus::Approved,
        QuotationStatus::Declined,
    ];

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "Draft",
            QuotationStatus::Pending => "Pending",
            QuotationStatus::Approved => "Approved",
            QuotationStatus::Declined => "Declined",
        }
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        QuotationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown quotation status: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(QuotationStatus::default(), QuotationStatus::Draft);
    }

    #[test]
    fn test_display() {
        assert_eq!(QuotationStatus::Draft.to_string(), "Draft");
        assert_eq!(QuotationStatus::Pending.to_string(), "Pending");
        assert_eq!(QuotationStatus::Approved.to_string(), "Approved");
        assert_eq!(QuotationStatus::Declined.to_string(), "Declined");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("approved".parse(), Ok(QuotationStatus::Approved));
        assert_eq!(" PENDING ".parse(), Ok(QuotationStatus::Pending));
        assert!("Archived".parse::<QuotationStatus>().is_err());
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&QuotationStatus::Declined).unwrap();
        assert_eq!(json, "\"Declined\"");
    }
}

//! Collection-wide quotation statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Quotation, QuotationStatus};

/// Summary of a quotation collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationStatistics {
    /// Number of quotations.
    pub total: usize,

    /// Number of quotations per status. Every status has an entry.
    pub counts_by_status: BTreeMap<QuotationStatus, usize>,

    /// Sum of all totals.
    pub total_value: f64,

    /// `total_value / total`, or zero for an empty collection.
    pub average_value: f64,
}

impl QuotationStatistics {
    /// Statistics of an empty collection.
    pub fn zeroed() -> Self {
        Self {
            total: 0,
            counts_by_status: QuotationStatus::ALL.iter().map(|s| (*s, 0)).collect(),
            total_value: 0.0,
            average_value: 0.0,
        }
    }

    /// Returns the number of quotations with `status`.
    pub fn count(&self, status: QuotationStatus) -> usize {
        self.counts_by_status.get(&status).copied().unwrap_or(0)
    }
}

impl Default for QuotationStatistics {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Summarizes `collection` in a single pass.
pub fn summarize(collection: &[Quotation]) -> QuotationStatistics {
    let mut stats = QuotationStatistics::zeroed();

    for quotation in collection {
        stats.total += 1;
        *stats.counts_by_status.entry(quotation.status()).or_insert(0) += 1;

        let amount = quotation.total_amount();
        if amount.is_finite() {
            stats.total_value += amount;
        }
    }

    if stats.total > 0 {
        stats.average_value = stats.total_value / stats.total as f64;
    }

    stats
}

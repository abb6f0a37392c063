//! Line-item totals.

use super::LineItem;

/// Sums `quantity * unit_price` over `items`.
///
/// Missing or non-numeric quantities and prices count as zero, so this never
/// fails. Exposed so the presentation layer can preview a total before saving.
pub fn calculate_total(items: &[LineItem]) -> f64 {
    // Summing from +0.0 keeps an empty list at 0 rather than -0
    items
        .iter()
        .map(LineItem::line_total)
        .fold(0.0, |total, line| total + line)
}

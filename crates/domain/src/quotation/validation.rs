//! Write-time validation rules for quotations.

use thiserror::Error;

use super::Quotation;

/// A quotation failed one or more validation rules.
///
/// The message lists every violation, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", violations.join("; "))]
pub struct ValidationFault {
    pub violations: Vec<String>,
}

/// Checks every rule and returns all violations. An empty list means the
/// quotation may be written.
pub fn validate(quotation: &Quotation) -> Vec<String> {
    let mut violations = Vec::new();

    if quotation.parent_ref().trim().is_empty() {
        violations.push("parent reference is required".to_string());
    }
    if quotation.price_list_ref().trim().is_empty() {
        violations.push("price list reference is required".to_string());
    }
    if !quotation.total_amount().is_finite() {
        violations.push("total amount must be a finite number".to_string());
    }

    violations
}

/// Runs [`validate`] and turns any violations into a single fault.
pub fn ensure_valid(quotation: &Quotation) -> Result<(), ValidationFault> {
    let violations = validate(quotation);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationFault { violations })
    }
}

//! Lenient numeric coercion.
//!
//! Line-item quantities and prices arrive from form input and may be missing,
//! blank, or not numeric at all. Every consumer coerces them through
//! [`lenient_f64`], which never fails: anything that is not a finite number
//! contributes `0.0`.

use serde::{Deserialize, Serialize};

/// A raw numeric field as supplied by a caller: either a number or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Returns the finite value this input represents, if any.
    pub fn to_finite(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    /// Returns the value with the zero default applied.
    pub fn to_f64_or_zero(&self) -> f64 {
        self.to_finite().unwrap_or(0.0)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<u32> for NumericInput {
    fn from(value: u32) -> Self {
        NumericInput::Number(f64::from(value))
    }
}

impl From<i32> for NumericInput {
    fn from(value: i32) -> Self {
        NumericInput::Number(f64::from(value))
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericInput::Number(n) => write!(f, "{n}"),
            NumericInput::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Coerces an optional raw value to `f64`, substituting `0.0` for missing,
/// non-numeric, or non-finite input.
pub fn lenient_f64(input: Option<&NumericInput>) -> f64 {
    input.map_or(0.0, NumericInput::to_f64_or_zero)
}

/// Multiplies two leniently-coerced values.
pub fn lenient_product(a: Option<&NumericInput>, b: Option<&NumericInput>) -> f64 {
    lenient_f64(a) * lenient_f64(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(lenient_f64(Some(&NumericInput::Number(15.5))), 15.5);
        assert_eq!(lenient_f64(Some(&2.into())), 2.0);
    }

    #[test]
    fn numeric_text_is_parsed() {
        assert_eq!(lenient_f64(Some(&" 12.25 ".into())), 12.25);
        assert_eq!(lenient_f64(Some(&"-3".into())), -3.0);
    }

    #[test]
    fn missing_and_malformed_values_become_zero() {
        assert_eq!(lenient_f64(None), 0.0);
        assert_eq!(lenient_f64(Some(&"abc".into())), 0.0);
        assert_eq!(lenient_f64(Some(&"".into())), 0.0);
        assert_eq!(lenient_f64(Some(&"NaN".into())), 0.0);
        assert_eq!(lenient_f64(Some(&"inf".into())), 0.0);
        assert_eq!(lenient_f64(Some(&NumericInput::Number(f64::INFINITY))), 0.0);
    }

    #[test]
    fn product_applies_zero_default_to_either_side() {
        let qty = NumericInput::from(2);
        let price = NumericInput::from(15.5);
        assert_eq!(lenient_product(Some(&qty), Some(&price)), 31.0);
        assert_eq!(lenient_product(Some(&qty), Some(&"abc".into())), 0.0);
        assert_eq!(lenient_product(None, Some(&price)), 0.0);
    }

    #[test]
    fn deserializes_numbers_and_strings() {
        let n: NumericInput = serde_json::from_str("4").unwrap();
        assert_eq!(n, NumericInput::Number(4.0));
        let s: NumericInput = serde_json::from_str("\"4.5\"").unwrap();
        assert_eq!(s.to_finite(), Some(4.5));
    }
}

//! Shared types used across the quotation record manager crates.

pub mod lenient;
pub mod types;

pub use lenient::{NumericInput, lenient_f64, lenient_product};
pub use types::RecordId;

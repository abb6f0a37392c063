//! Domain layer for the quotation record manager.
//!
//! This crate provides the entity lifecycle core:
//! - Record trait describing persisted, searchable entity types
//! - Sequence number generation backed by an atomic counter
//! - Quotation entity with validation, line-item totals and statistics
//! - Substring search over declared fields
//! - QuotationService orchestrating writes, reads and mirror publication

pub mod config;
pub mod error;
pub mod fault;
pub mod quotation;
pub mod record;
pub mod search;
pub mod sequence;

pub use config::ServiceConfig;
pub use error::DomainError;
pub use fault::{FaultReporter, RecordingFaultReporter, ReportedFault, TracingFaultReporter};
pub use quotation::{
    ItemId, LineItem, NewQuotation, Quotation, QuotationPatch, QuotationService,
    QuotationStatistics, QuotationStatus, ValidationFault, calculate_total, ensure_valid, summarize,
    validate,
};
pub use record::Record;
pub use search::{SearchField, filter};
pub use sequence::{GenerationFault, SequenceConfig, SequenceNumber, SequenceNumberGenerator};

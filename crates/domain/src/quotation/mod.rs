//! Quotation entity and its lifecycle.
//!
//! A quotation is issued under a project (`parent_ref`) and priced from a
//! price list (`price_list_ref`). Its total is derived from the line items
//! and kept current on every change.

mod calculator;
mod commands;
mod entity;
mod item;
mod service;
mod statistics;
mod status;
mod validation;

pub use calculator::calculate_total;
pub use commands::{NewQuotation, QuotationPatch};
pub use entity::Quotation;
pub use item::{ItemId, LineItem};
pub use service::QuotationService;
pub use statistics::{QuotationStatistics, summarize};
pub use status::QuotationStatus;
pub use validation::{ValidationFault, ensure_valid, validate};

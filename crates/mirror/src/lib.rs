//! Read mirror for the presentation layer.
//!
//! This crate provides the query-facing side of the record manager:
//! - [`StatePublisher`] trait for keyed, last-write-wins shared state
//! - [`StateContext`], the in-process publisher created at start-up
//! - [`StateSynchronizer`], which republishes a whole collection under a live
//!   key and an independent original snapshot key used for dirty tracking

pub mod context;
pub mod error;
pub mod publisher;
pub mod synchronizer;

pub use context::StateContext;
pub use error::{MirrorError, Result};
pub use publisher::{StatePublisher, StatePublisherExt};
pub use synchronizer::StateSynchronizer;

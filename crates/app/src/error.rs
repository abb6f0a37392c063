//! Application error types.

use domain::DomainError;
use record_store::StoreError;
use thiserror::Error;

/// Errors that can stop the application from starting.
#[derive(Debug, Error)]
pub enum AppError {
    /// The tracing subscriber could not be installed.
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),

    /// The metrics recorder could not be installed.
    #[error("Metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// The record store could not be reached or migrated.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The initial mirror publication failed.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

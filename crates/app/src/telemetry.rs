//! Tracing subscriber and metrics recorder set-up.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, LogFormat};
use crate::error::AppError;

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &Config) -> Result<(), AppError> {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (text, json) = match config.log_format {
        LogFormat::Text => (Some(fmt::layer()), None),
        LogFormat::Json => (None, Some(fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .try_init()?;

    Ok(())
}

/// Installs the global Prometheus recorder and returns the handle used to
/// render its snapshot. No HTTP listener is started.
pub fn install_metrics() -> Result<PrometheusHandle, AppError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

//! Host process for the quotation record manager.
//!
//! Loads configuration, installs tracing, opens the record store and owns
//! the application context: the shared state mirror and the services the
//! presentation layer calls into.

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;

use std::sync::Arc;

use domain::{FaultReporter, QuotationService, TracingFaultReporter};
use metrics_exporter_prometheus::PrometheusHandle;
use mirror::StateContext;
use record_store::{InMemoryRecordStore, PostgresRecordStore, StoreError};

pub use config::{Config, LogFormat};
pub use error::AppError;
pub use store::AppStore;

/// Everything the presentation layer needs, created once at start-up.
pub struct AppContext {
    /// Process-wide keyed state the read mirror is published into.
    pub state: StateContext,

    /// Quotation lifecycle service.
    pub quotations: QuotationService<AppStore>,

    metrics: PrometheusHandle,
}

impl AppContext {
    /// Opens the configured store and builds the context.
    ///
    /// Uses PostgreSQL when `database_url` is set, running pending
    /// migrations first, and an in-memory store otherwise.
    pub async fn start(config: &Config, metrics: PrometheusHandle) -> Result<Self, AppError> {
        let store = match &config.database_url {
            Some(url) => {
                let store = PostgresRecordStore::connect(url).await?;
                store.run_migrations().await.map_err(StoreError::from)?;
                AppStore::Postgres(store)
            }
            None => AppStore::InMemory(InMemoryRecordStore::new()),
        };

        Self::with_store(store, config, metrics).await
    }

    /// Builds the context over an already opened store and publishes the
    /// initial mirror.
    pub async fn with_store(
        store: AppStore,
        config: &Config,
        metrics: PrometheusHandle,
    ) -> Result<Self, AppError> {
        let state = StateContext::new();
        let reporter: Arc<dyn FaultReporter> = Arc::new(TracingFaultReporter);
        let backend = store.backend();

        let quotations = QuotationService::new(
            store,
            Arc::new(state.clone()),
            reporter,
            config.service_config(),
        );
        quotations.sync_mirror().await?;

        tracing::info!(backend, "application context started");
        Ok(Self {
            state,
            quotations,
            metrics,
        })
    }

    /// Returns the handle of the metrics recorder.
    pub fn metrics(&self) -> &PrometheusHandle {
        &self.metrics
    }

    /// Logs the final metrics snapshot, clears the shared state and releases
    /// the store.
    pub async fn shutdown(self) {
        tracing::info!(metrics = %self.metrics.render(), "final metrics snapshot");
        self.state.clear().await;
        self.quotations.store().close().await;
        tracing::info!("application context shut down");
    }
}

//! Record manager entry point.

use app::{AppContext, Config};
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, shutting down");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, shutting down");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    app::telemetry::init(&config).expect("failed to initialize tracing");

    // 2. Install metrics recorder
    let metrics = app::telemetry::install_metrics().expect("failed to install metrics recorder");

    // 3. Open the store and publish the initial mirror
    let ctx = AppContext::start(&config, metrics)
        .await
        .expect("failed to start application context");

    let stats = ctx.quotations.get_statistics().await;
    tracing::info!(
        quotations = stats.total,
        total_value = stats.total_value,
        "record manager ready"
    );

    // 4. Serve until asked to stop
    shutdown_signal().await;

    ctx.shutdown().await;
    tracing::info!("record manager stopped");
}

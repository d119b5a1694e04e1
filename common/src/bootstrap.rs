// Bootstrap utilities shared by the scheduler and api binaries

use crate::config::Settings;
use crate::telemetry;
use anyhow::{Context, Result};
use tracing::{error, info};

/// Load configuration from `config/` and the environment, then validate it
///
/// # Errors
/// Returns error if a configuration source fails to parse or validation fails
pub fn load_settings() -> Result<Settings> {
    let settings = Settings::load().context("Failed to load configuration")?;
    settings
        .validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

/// Initialize logging and, when a metrics port is configured, the Prometheus exporter
///
/// # Errors
/// Returns error if the subscriber or exporter cannot be installed
pub fn init_telemetry(settings: &Settings) -> Result<()> {
    telemetry::init_logging(
        &settings.observability.log_level,
        settings.observability.log_format,
    )?;

    if let Some(port) = settings.observability.metrics_port {
        telemetry::init_metrics(port)?;
    }

    Ok(())
}

/// Resolve when the process receives Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Initiating graceful shutdown");
}

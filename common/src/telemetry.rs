// Telemetry module for structured logging and metrics

use crate::config::LogFormat;
use crate::models::WorkloadRun;
use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize structured logging
///
/// `RUST_LOG` wins over the configured level when it is set. JSON output
/// carries span context so a workload run's fields show up on every event
/// logged inside it.
pub fn init_logging(log_level: &str, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| anyhow::anyhow!("Failed to create env filter: {}", e))?;

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .with_filter(env_filter)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {}", e))?;

    tracing::info!(
        log_level = log_level,
        log_format = ?format,
        "Structured logging initialized"
    );

    Ok(())
}

/// Initialize Prometheus metrics exporter on its own listener
///
/// Registers:
/// - workload_runs_total: Counter of workload runs by status
/// - workload_duration_seconds: Histogram of workload run duration
/// - trending_reads_total: Counter of data file reads by outcome
pub fn init_metrics(metrics_port: u16) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", metrics_port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid metrics port: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus exporter: {}", e))?;

    describe_counter!("workload_runs_total", "Total number of workload runs");
    describe_histogram!(
        "workload_duration_seconds",
        "Duration of workload runs in seconds"
    );
    describe_counter!(
        "trending_reads_total",
        "Total number of trending data file reads"
    );

    tracing::info!(
        metrics_port = metrics_port,
        metrics_endpoint = format!("http://0.0.0.0:{}/metrics", metrics_port),
        "Prometheus metrics exporter initialized"
    );

    Ok(())
}

/// Record a finished workload run
#[inline]
pub fn record_workload_run(run: &WorkloadRun) {
    counter!(
        "workload_runs_total",
        "status" => run.status.to_string(),
        "trigger" => run.trigger.to_string()
    )
    .increment(1);

    if let Some(duration) = run.duration_seconds() {
        histogram!("workload_duration_seconds").record(duration);
    }
}

/// Record a data file read made on behalf of an HTTP request
#[inline]
pub fn record_trending_read(outcome: &'static str) {
    counter!("trending_reads_total", "outcome" => outcome).increment(1);
}

// Scheduler engine implementation
//
// Runs the workload once at startup, then again whenever the fixed run
// interval has elapsed since the previous run finished.

use crate::executor::Workload;
use crate::models::{TriggerSource, WorkloadRun};
use crate::storage::DataFile;
use crate::telemetry;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::watch;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, error, info, instrument, trace, warn};

/// Configuration for the scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How often to check whether the next run is due (in seconds)
    pub poll_interval_seconds: u64,
    /// Time between the end of one run and the start of the next (in seconds)
    pub run_interval_seconds: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 1,
            run_interval_seconds: 24 * 60 * 60,
        }
    }
}

impl From<&crate::config::SchedulerConfig> for SchedulerConfig {
    fn from(settings: &crate::config::SchedulerConfig) -> Self {
        Self {
            poll_interval_seconds: settings.poll_interval_seconds,
            run_interval_seconds: settings.run_interval_seconds,
        }
    }
}

impl SchedulerConfig {
    fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    fn run_interval(&self) -> Duration {
        Duration::from_secs(self.run_interval_seconds)
    }
}

/// Scheduler trait for periodic workload operations
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Run the workload once, then enter the polling loop until stopped
    async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Stop the polling loop. A run already in progress is not interrupted.
    async fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Run the workload to completion and report the outcome
    async fn run_workload(&self, trigger: TriggerSource) -> WorkloadRun;
}

/// Main scheduler engine implementation
pub struct SchedulerEngine {
    config: SchedulerConfig,
    workload: Arc<dyn Workload>,
    data_file: DataFile,
    shutdown_tx: watch::Sender<bool>,
}

impl SchedulerEngine {
    /// Create a new scheduler engine
    pub fn new(config: SchedulerConfig, workload: Arc<dyn Workload>, data_file: DataFile) -> Self {
        let (shutdown_tx, _shutdown_rx) = watch::channel(false);

        Self {
            config,
            workload,
            data_file,
            shutdown_tx,
        }
    }

    /// Get a shutdown signal receiver
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// Compare the data file's modification time across a run.
    ///
    /// The workload is expected to rewrite the file but nothing guarantees it,
    /// so a stale file is only reported.
    async fn observe_data_file(&self, before: Option<SystemTime>) {
        let after = self.data_file.modified().await;
        let path = self.data_file.path().display();

        match (before, after) {
            (_, None) => {
                warn!(path = %path, "Data file is missing after workload run");
            }
            (Some(before), Some(after)) if after <= before => {
                warn!(path = %path, "Data file was not refreshed by workload run");
            }
            _ => {
                debug!(path = %path, "Data file refreshed");
            }
        }
    }
}

#[async_trait]
impl Scheduler for SchedulerEngine {
    #[instrument(skip(self))]
    async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            poll_interval_seconds = self.config.poll_interval_seconds,
            run_interval_seconds = self.config.run_interval_seconds,
            workload = %self.workload.describe(),
            "Starting scheduler engine"
        );

        let mut shutdown_rx = self.shutdown_receiver();

        self.run_workload(TriggerSource::Startup).await;
        let mut next_due = Instant::now() + self.config.run_interval();

        let mut poll_interval = interval(self.config.poll_interval());
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown_rx.borrow() {
                info!("Shutdown signal received, stopping scheduler");
                break;
            }

            tokio::select! {
                _ = poll_interval.tick() => {
                    let now = Instant::now();
                    if now < next_due {
                        trace!(remaining_seconds = (next_due - now).as_secs(), "Workload not due");
                        continue;
                    }

                    self.run_workload(TriggerSource::Scheduled).await;
                    next_due = Instant::now() + self.config.run_interval();
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        info!("Shutdown channel closed, stopping scheduler");
                        break;
                    }
                }
            }
        }

        info!("Scheduler engine stopped");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("Stopping scheduler engine");
        self.shutdown_tx.send_replace(true);
        Ok(())
    }

    #[instrument(skip(self), fields(run_id))]
    async fn run_workload(&self, trigger: TriggerSource) -> WorkloadRun {
        let mut run = WorkloadRun::start(trigger);
        tracing::Span::current().record("run_id", tracing::field::display(run.id));

        let modified_before = self.data_file.modified().await;

        info!(workload = %self.workload.describe(), "Running workload");

        match self.workload.run().await {
            Ok(()) => {
                run.succeed();
                info!(
                    duration_seconds = run.duration_seconds().unwrap_or_default(),
                    "Workload executed"
                );
            }
            Err(e) => {
                run.fail(e.exit_code(), e.to_string());
                // Failure never affects the schedule
                error!(
                    error = %e,
                    exit_code = ?run.exit_code,
                    "Workload failed"
                );
            }
        }

        self.observe_data_file(modified_before).await;
        telemetry::record_workload_run(&run);

        info!(status = %run.status, "Job completed");
        run
    }
}

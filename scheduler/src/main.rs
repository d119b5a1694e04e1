// Scheduler binary entry point
//
// Runs the trending data workload at startup and then once per run interval.

use common::bootstrap;
use common::executor::{ContainerWorkload, Workload};
use common::scheduler::{Scheduler, SchedulerConfig, SchedulerEngine};
use common::storage::DataFile;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = bootstrap::load_settings()?;
    bootstrap::init_telemetry(&settings)?;

    info!("Starting trending data scheduler");

    let workload = Arc::new(ContainerWorkload::from_config(&settings.workload)) as Arc<dyn Workload>;
    info!(
        workload = %workload.describe(),
        working_dir = ?settings.workload.working_dir,
        "Workload configured"
    );

    let data_file = DataFile::new(&settings.data.path);
    info!(path = %data_file.path().display(), "Watching shared data file");

    let scheduler_config = SchedulerConfig::from(&settings.scheduler);
    let scheduler = Arc::new(SchedulerEngine::new(scheduler_config, workload, data_file));

    // Set up graceful shutdown
    let scheduler_for_shutdown = scheduler.clone();
    tokio::spawn(async move {
        bootstrap::shutdown_signal().await;
        if let Err(e) = scheduler_for_shutdown.stop().await {
            error!(error = %e, "Error during scheduler shutdown");
        }
    });

    if let Err(e) = scheduler.start().await {
        error!(error = %e, "Scheduler error");
        return Err(anyhow::anyhow!(e));
    }

    info!("Scheduler stopped");
    Ok(())
}

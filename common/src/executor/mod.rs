// Executor module for workload invocation
// Provides the Workload trait and the container-backed implementation

pub mod container;

use crate::errors::WorkloadError;
use async_trait::async_trait;

pub use container::ContainerWorkload;

/// Workload is the opaque unit of work the producer runs on every cycle.
///
/// Implementations block until the work finishes. Nothing about the work's
/// side effects is checked here.
#[async_trait]
pub trait Workload: Send + Sync {
    /// Run the workload to completion
    async fn run(&self) -> Result<(), WorkloadError>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

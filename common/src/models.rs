use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Workload Run Models
// ============================================================================

/// TriggerSource represents why a workload run was started
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// The run executed immediately when the producer started
    Startup,
    /// The run fired because the fixed interval elapsed
    Scheduled,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerSource::Startup => write!(f, "startup"),
            TriggerSource::Scheduled => write!(f, "scheduled"),
        }
    }
}

/// RunStatus represents the status of a workload run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Success,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Running => write!(f, "running"),
            RunStatus::Success => write!(f, "success"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

/// WorkloadRun is the in-memory record of a single workload invocation.
/// It feeds logs and metrics and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadRun {
    pub id: Uuid,
    pub trigger: TriggerSource,
    pub status: RunStatus,
    pub exit_code: Option<i32>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl WorkloadRun {
    /// Start a new run record in the running state
    pub fn start(trigger: TriggerSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            trigger,
            status: RunStatus::Running,
            exit_code: None,
            started_at: Utc::now(),
            completed_at: None,
            error: None,
        }
    }

    pub fn succeed(&mut self) {
        self.status = RunStatus::Success;
        self.exit_code = Some(0);
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, exit_code: Option<i32>, error: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.exit_code = exit_code;
        self.error = Some(error.into());
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock duration of the run in seconds, once completed
    pub fn duration_seconds(&self) -> Option<f64> {
        self.completed_at.map(|completed| {
            (completed - self.started_at)
                .to_std()
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0)
        })
    }

    pub fn is_finished(&self) -> bool {
        self.status != RunStatus::Running
    }
}

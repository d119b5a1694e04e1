// Error handling framework

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the shared trending data file
#[derive(Error, Debug)]
pub enum DataFileError {
    #[error("Data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read data file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    #[error("Invalid JSON in data file {}: {reason}", .path.display())]
    InvalidJson { path: PathBuf, reason: String },
}

impl DataFileError {
    /// Short label used for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            DataFileError::NotFound(_) => "not_found",
            DataFileError::Read { .. } => "read_failed",
            DataFileError::InvalidJson { .. } => "invalid_json",
        }
    }
}

/// Workload invocation errors
#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("Failed to run workload '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    #[error("Workload '{command}' exited with {}", exit_description(.code))]
    NonZeroExit { command: String, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status code {}", code),
        None => "no status code (terminated by signal)".to_string(),
    }
}

impl WorkloadError {
    /// Exit code reported by the workload process, if it got that far
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            WorkloadError::SpawnFailed { .. } => None,
            WorkloadError::NonZeroExit { code, .. } => *code,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// Configuration management with layered configuration (defaults, file, env)

use crate::errors::ConfigError;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main settings structure containing all configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub scheduler: SchedulerConfig,
    pub workload: WorkloadConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Location of the shared trending data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub poll_interval_seconds: u64,
    pub run_interval_seconds: u64,
}

/// External command the producer runs on every cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl Settings {
    /// Load configuration with layered precedence: defaults → file → env
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with built-in defaults
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local configuration (not committed to git)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("workload.args")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("Server port must be greater than 0"));
        }

        if self.data.path.as_os_str().is_empty() {
            return Err(invalid("Data file path cannot be empty"));
        }

        if self.scheduler.poll_interval_seconds == 0 {
            return Err(invalid(
                "Scheduler poll_interval_seconds must be greater than 0",
            ));
        }
        if self.scheduler.run_interval_seconds == 0 {
            return Err(invalid(
                "Scheduler run_interval_seconds must be greater than 0",
            ));
        }
        if self.scheduler.run_interval_seconds < self.scheduler.poll_interval_seconds {
            return Err(invalid(
                "Scheduler run_interval_seconds cannot be shorter than poll_interval_seconds",
            ));
        }

        if self.workload.program.trim().is_empty() {
            return Err(invalid("Workload program cannot be empty"));
        }

        if self.observability.log_level.trim().is_empty() {
            return Err(invalid("Log level cannot be empty"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            data: DataConfig {
                path: PathBuf::from("github_trending_repos.json"),
            },
            scheduler: SchedulerConfig {
                poll_interval_seconds: 1,
                run_interval_seconds: 24 * 60 * 60,
            },
            workload: WorkloadConfig {
                program: "docker-compose".to_string(),
                args: vec!["run".to_string(), "--rm".to_string(), "jupyter".to_string()],
                working_dir: None,
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                log_format: LogFormat::Json,
                metrics_port: None,
            },
        }
    }
}

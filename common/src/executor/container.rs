// Container workload executor
// Runs an external command (by default `docker-compose run --rm jupyter`)

use crate::config::WorkloadConfig;
use crate::errors::WorkloadError;
use crate::executor::Workload;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// ContainerWorkload shells out to a container runtime and waits for it to exit
#[derive(Debug, Clone)]
pub struct ContainerWorkload {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl ContainerWorkload {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn from_config(config: &WorkloadConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.clone(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl Workload for ContainerWorkload {
    /// Spawn the command with inherited stdio and wait for it.
    /// No timeout is applied.
    #[instrument(skip(self), fields(command = %self.command_line()))]
    async fn run(&self) -> Result<(), WorkloadError> {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        debug!("Spawning workload process");

        let status = command
            .status()
            .await
            .map_err(|e| WorkloadError::SpawnFailed {
                command: self.command_line(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(WorkloadError::NonZeroExit {
                command: self.command_line(),
                code: status.code(),
            });
        }

        debug!("Workload process exited successfully");
        Ok(())
    }

    fn describe(&self) -> String {
        self.command_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_describes_compose_run() {
        let workload = ContainerWorkload::from_config(&crate::config::Settings::default().workload);
        assert_eq!(workload.describe(), "docker-compose run --rm jupyter");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_failure() {
        let workload = ContainerWorkload::new("definitely-not-a-real-binary-4f2a", vec![]);
        let err = workload.run().await.unwrap_err();
        assert!(matches!(err, WorkloadError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let workload = ContainerWorkload::new("sh", vec!["-c".into(), "exit 0".into()]);
        assert!(workload.run().await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_reports_code() {
        let workload = ContainerWorkload::new("sh", vec!["-c".into(), "exit 3".into()]);
        let err = workload.run().await.unwrap_err();
        match err {
            WorkloadError::NonZeroExit { code, command } => {
                assert_eq!(code, Some(3));
                assert_eq!(command, "sh -c exit 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_working_dir_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let workload = ContainerWorkload::new("sh", vec!["-c".into(), "echo '{}' > out.json".into()])
            .with_working_dir(dir.path());

        workload.run().await.unwrap();
        assert!(dir.path().join("out.json").exists());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_stdin_is_inherited() {
        // docker-compose only allocates a TTY when its stdin is one
        let Ok(parent_stdin) = std::fs::read_link("/proc/self/fd/0") else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let workload = ContainerWorkload::new(
            "sh",
            vec!["-c".into(), "readlink /proc/$$/fd/0 > stdin.txt".into()],
        )
        .with_working_dir(dir.path());

        workload.run().await.unwrap();
        let child_stdin = std::fs::read_to_string(dir.path().join("stdin.txt")).unwrap();
        assert_eq!(child_stdin.trim(), parent_stdin.to_string_lossy());
    }
}

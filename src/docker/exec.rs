//! Exec helpers: shell checks over the API, interactive sessions over the CLI

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use async_trait::async_trait;
use bollard::exec::{CreateExecOptions, StartExecResults};
use futures::StreamExt;
use tracing::{debug, info};

use crate::core::{DockerError, Result};
use crate::docker::DockerClient;

/// Whether a candidate shell can run inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCheck {
    Available,
    Missing,
}

impl ShellCheck {
    /// A check runs `<shell> -c "exit 0"`, so anything but 0 means unusable
    pub fn from_exit_code(exit_code: Option<i64>) -> Self {
        match exit_code {
            Some(0) => ShellCheck::Available,
            _ => ShellCheck::Missing,
        }
    }
}

impl DockerClient {
    /// Run a throwaway non-interactive exec to see whether `shell` exists
    pub async fn check_shell(&self, container_id: &str, shell: &str) -> Result<ShellCheck> {
        debug!("Checking shell {} in container {}", shell, container_id);

        let create = CreateExecOptions::<String> {
            attach_stdout: Some(true),
            attach_stderr: Some(true),
            tty: Some(false),
            cmd: Some(vec![
                shell.to_string(),
                "-c".to_string(),
                "exit 0".to_string(),
            ]),
            ..Default::default()
        };

        let exec = self
            .inner()
            .create_exec(container_id, create)
            .await
            .map_err(|e| DockerError::Exec(format!("Failed to create exec: {e}")))?;

        let started = self
            .inner()
            .start_exec(&exec.id, None)
            .await
            .map_err(|e| DockerError::Exec(format!("Failed to start exec: {e}")))?;

        if let StartExecResults::Attached { mut output, .. } = started {
            while output.next().await.is_some() {}
        }

        let inspect = self
            .inner()
            .inspect_exec(&exec.id)
            .await
            .map_err(|e| DockerError::Exec(format!("Failed to inspect exec: {e}")))?;

        let check = ShellCheck::from_exit_code(inspect.exit_code);
        debug!("Shell {} check result: {:?}", shell, check);
        Ok(check)
    }
}

/// Hand the terminal to `<cli> exec -it <id> <argv...>` until it exits
///
/// The child is killed if the returned future is dropped.
async fn attach_interactive(
    cli: &Path,
    container_id: &str,
    argv: &[String],
) -> Result<ExitStatus> {
    info!(
        "Attaching interactive exec to {}: {:?}",
        container_id, argv
    );

    let status = tokio::process::Command::new(cli)
        .arg("exec")
        .arg("-it")
        .arg(container_id)
        .args(argv)
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| DockerError::Exec(format!("Failed to launch {}: {e}", cli.display())))?;

    info!("Interactive exec in {} finished: {}", container_id, status);
    Ok(status)
}

/// The two steps of an interactive exec
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExecRunner: Send + Sync {
    /// Check a candidate shell without a terminal
    async fn check_shell(&self, container_id: &str, shell: &str) -> Result<ShellCheck>;

    /// Run `argv` attached to the user's terminal until it exits
    async fn attach(&self, container_id: &str, argv: &[String]) -> Result<ExitStatus>;
}

/// Checks shells through the API, attaches through the engine CLI
pub struct CliExec {
    client: DockerClient,
    cli: PathBuf,
}

impl CliExec {
    pub fn new(client: DockerClient, cli: PathBuf) -> Self {
        Self { client, cli }
    }
}

#[async_trait]
impl ExecRunner for CliExec {
    async fn check_shell(&self, container_id: &str, shell: &str) -> Result<ShellCheck> {
        self.client.check_shell(container_id, shell).await
    }

    async fn attach(&self, container_id: &str, argv: &[String]) -> Result<ExitStatus> {
        attach_interactive(&self.cli, container_id, argv).await
    }
}

/// Commands to try for an exec request; configured shells when none is given
pub fn exec_candidates(command: &[String], shells: &[String]) -> Vec<Vec<String>> {
    if command.is_empty() {
        shells
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| vec![s.clone()])
            .collect()
    } else {
        vec![command.to_vec()]
    }
}

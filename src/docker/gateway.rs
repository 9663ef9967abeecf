//! The engine seam the controller talks to

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::{ActionResult, ContainerDetails, ContainerRef, LogMode, Result};
use crate::docker::exec::{exec_candidates, CliExec, ExecRunner, ShellCheck};
use crate::docker::{DockerClient, LogStream};

/// One operation per engine capability
///
/// Mutating calls never fail with `Err`: engine errors come back as a failed
/// `ActionResult` so the session can keep going. Nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerEngine: Send + Sync {
    async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerRef>>;

    async fn start(&self, id: &str) -> ActionResult;

    async fn stop(&self, id: &str) -> ActionResult;

    async fn restart(&self, id: &str) -> ActionResult;

    async fn remove(&self, id: &str) -> ActionResult;

    async fn export_to_file(&self, id: &str, path: &Path) -> ActionResult;

    async fn commit_to_image(&self, id: &str, name: &str, tag: &str) -> ActionResult;

    fn stream_logs(&self, id: &str, mode: LogMode) -> LogStream;

    /// Interactive session; an empty `command` means "open a shell"
    async fn exec_interactive(&self, id: &str, command: &[String]) -> ActionResult;

    async fn inspect(&self, id: &str) -> Result<ContainerDetails>;
}

/// `ContainerEngine` backed by the Docker API and the `docker` CLI
pub struct DockerGateway {
    client: DockerClient,
    exec: CliExec,
    shells: Vec<String>,
    stop_timeout: i64,
    force_remove: bool,
}

impl DockerGateway {
    pub fn new(client: DockerClient, cli: PathBuf, config: &Config) -> Self {
        Self {
            exec: CliExec::new(client.clone(), cli),
            client,
            shells: config.exec.shells.clone(),
            stop_timeout: config.docker.stop_timeout_secs,
            force_remove: config.docker.force_remove,
        }
    }
}

fn short(id: &str) -> String {
    id.chars().take(12).collect()
}

fn outcome<T>(action: &str, id: &str, result: Result<T>) -> ActionResult {
    let result = result.map(|_| ()).map_err(|e| {
        warn!("{} failed for {}: {}", action, id, e);
        e.user_message()
    });
    ActionResult::from_outcome(action, &short(id), result)
}

/// Attach to `command`, or to the first configured shell that passes a check
async fn exec_session<R: ExecRunner + ?Sized>(
    runner: &R,
    id: &str,
    command: &[String],
    shells: &[String],
) -> ActionResult {
    let shell_session = command.is_empty();

    for argv in exec_candidates(command, shells) {
        if shell_session {
            match runner.check_shell(id, &argv[0]).await {
                Ok(ShellCheck::Available) => {}
                Ok(ShellCheck::Missing) => {
                    debug!("Shell {} not usable in {}", argv[0], id);
                    continue;
                }
                Err(e) => return outcome::<()>("Exec", id, Err(e)),
            }
        }

        return match runner.attach(id, &argv).await {
            Ok(status) if shell_session => ActionResult::success(format!(
                "Shell session in {} ended ({})",
                short(id),
                status
            )),
            Ok(status) if status.success() => {
                ActionResult::success(format!("`{}` finished", argv.join(" ")))
            }
            Ok(status) => {
                ActionResult::failure(format!("Exec failed: `{}` {}", argv.join(" "), status))
            }
            Err(e) => outcome::<()>("Exec", id, Err(e)),
        };
    }

    info!("No usable shell in {}", id);
    ActionResult::failure(format!(
        "Exec failed: no shell available in {} (tried {})",
        short(id),
        shells.join(", ")
    ))
}

#[async_trait]
impl ContainerEngine for DockerGateway {
    async fn list_containers(&self, include_stopped: bool) -> Result<Vec<ContainerRef>> {
        self.client.list_containers(include_stopped).await
    }

    async fn start(&self, id: &str) -> ActionResult {
        outcome("Start", id, self.client.start_container(id).await)
    }

    async fn stop(&self, id: &str) -> ActionResult {
        outcome(
            "Stop",
            id,
            self.client.stop_container(id, self.stop_timeout).await,
        )
    }

    async fn restart(&self, id: &str) -> ActionResult {
        outcome(
            "Restart",
            id,
            self.client.restart_container(id, self.stop_timeout).await,
        )
    }

    async fn remove(&self, id: &str) -> ActionResult {
        outcome(
            "Remove",
            id,
            self.client.remove_container(id, self.force_remove).await,
        )
    }

    async fn export_to_file(&self, id: &str, path: &Path) -> ActionResult {
        match self.client.export_container(id, path).await {
            Ok(bytes) => ActionResult::success(format!(
                "Exported {} to {} ({} bytes)",
                short(id),
                path.display(),
                bytes
            )),
            Err(e) => outcome::<()>("Export", id, Err(e)),
        }
    }

    async fn commit_to_image(&self, id: &str, name: &str, tag: &str) -> ActionResult {
        match self.client.commit_container(id, name, tag).await {
            Ok(()) => ActionResult::success(format!(
                "Committed {} as {}:{}",
                short(id),
                name,
                tag
            )),
            Err(e) => outcome::<()>("Commit", id, Err(e)),
        }
    }

    fn stream_logs(&self, id: &str, mode: LogMode) -> LogStream {
        self.client.stream_logs(id, mode)
    }

    async fn exec_interactive(&self, id: &str, command: &[String]) -> ActionResult {
        exec_session(&self.exec, id, command, &self.shells).await
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails> {
        self.client.inspect_container(id).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    use mockall::predicate::eq;
    use mockall::Sequence;

    use super::*;
    use crate::core::DockerError;
    use crate::docker::exec::MockExecRunner;

    fn shells() -> Vec<String> {
        vec!["/bin/bash".to_string(), "/bin/sh".to_string()]
    }

    #[tokio::test]
    async fn falls_back_to_next_shell() {
        let mut runner = MockExecRunner::new();
        let mut seq = Sequence::new();
        runner
            .expect_check_shell()
            .with(eq("abc123"), eq("/bin/bash"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ShellCheck::Missing));
        runner
            .expect_check_shell()
            .with(eq("abc123"), eq("/bin/sh"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ShellCheck::Available));
        runner
            .expect_attach()
            .withf(|id, argv| id == "abc123" && argv.to_vec() == vec!["/bin/sh"])
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(ExitStatus::from_raw(0)));

        let result = exec_session(&runner, "abc123", &[], &shells()).await;
        assert!(result.succeeded);
        assert!(result.message.starts_with("Shell session in abc123 ended"));
    }

    #[tokio::test]
    async fn no_usable_shell_is_typed_failure() {
        let mut runner = MockExecRunner::new();
        runner
            .expect_check_shell()
            .times(2)
            .returning(|_, _| Ok(ShellCheck::Missing));
        runner.expect_attach().times(0);

        let result = exec_session(&runner, "abc123", &[], &shells()).await;
        assert!(!result.succeeded);
        assert_eq!(
            result.message,
            "Exec failed: no shell available in abc123 (tried /bin/bash, /bin/sh)"
        );
    }

    #[tokio::test]
    async fn shell_check_error_aborts_without_trying_more_shells() {
        let mut runner = MockExecRunner::new();
        runner
            .expect_check_shell()
            .times(1)
            .returning(|_, _| {
                Err(DockerError::Exec("container is not running".to_string()).into())
            });
        runner.expect_attach().times(0);

        let result = exec_session(&runner, "abc123", &[], &shells()).await;
        assert!(!result.succeeded);
        assert_eq!(result.message, "Exec failed: container is not running");
    }

    #[tokio::test]
    async fn explicit_command_skips_shell_checks() {
        let mut runner = MockExecRunner::new();
        runner.expect_check_shell().times(0);
        runner
            .expect_attach()
            .withf(|_, argv| argv.to_vec() == vec!["false"])
            .times(1)
            // Wait status for exit code 1
            .returning(|_, _| Ok(ExitStatus::from_raw(1 << 8)));

        let command = vec!["false".to_string()];
        let result = exec_session(&runner, "abc123", &command, &shells()).await;
        assert!(!result.succeeded);
        assert!(result.message.starts_with("Exec failed: `false`"));
    }
}

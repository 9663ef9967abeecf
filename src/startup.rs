//! Preconditions checked before the session starts

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::core::{ConnectionInfo, Result, StartupError};
use crate::docker::DockerClient;

/// Everything the session needs from the host system
pub struct Environment {
    pub client: DockerClient,
    /// Resolved engine CLI, used for interactive exec
    pub cli: PathBuf,
    pub finder: PathBuf,
}

impl Environment {
    pub fn connection_info(&self) -> &ConnectionInfo {
        self.client.connection_info()
    }
}

/// Resolve a required executable on PATH
pub fn locate(tool: &str) -> Result<PathBuf> {
    let path = which::which(tool).map_err(|e| {
        debug!("Lookup of {} failed: {}", tool, e);
        StartupError::DependencyMissing {
            tool: tool.to_string(),
        }
    })?;
    debug!("Found {} at {}", tool, path.display());
    Ok(path)
}

/// Check the engine CLI, the finder and the daemon, in that order
pub async fn check(config: &Config) -> Result<Environment> {
    let cli = locate(&config.docker.cli)?;
    let finder = locate(&config.finder.binary)?;
    let client = connect(config.docker.host.as_deref()).await?;

    Ok(Environment {
        client,
        cli,
        finder,
    })
}

/// Connect and ping; any failure means the daemon is unreachable
pub async fn connect(host: Option<&str>) -> Result<DockerClient> {
    let client = DockerClient::connect(host)
        .await
        .map_err(|e| StartupError::EngineUnreachable(e.to_string()))?;
    client
        .ping()
        .await
        .map_err(|e| StartupError::EngineUnreachable(e.to_string()))?;

    let info = client.connection_info();
    info!(
        "Docker daemon reachable: {} (API: {})",
        info.version, info.api_version
    );
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DockPickError;

    #[test]
    fn missing_tool_is_dependency_error() {
        let err = locate("dockpick-no-such-tool-7f3a").unwrap_err();
        match err {
            DockPickError::Startup(StartupError::DependencyMissing { tool }) => {
                assert_eq!(tool, "dockpick-no-such-tool-7f3a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn present_tool_is_found() {
        let path = locate("sh").unwrap();
        assert!(path.ends_with("sh"));
    }

    #[tokio::test]
    async fn missing_finder_is_reported_before_connecting() {
        let mut config = Config::default();
        config.docker.cli = "sh".to_string();
        config.finder.binary = "dockpick-no-such-finder".to_string();

        let err = check(&config).await.err().unwrap();
        assert!(matches!(
            err,
            DockPickError::Startup(StartupError::DependencyMissing { .. })
        ));
        assert!(err.user_message().contains("dockpick-no-such-finder"));
    }
}

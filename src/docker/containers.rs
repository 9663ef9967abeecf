//! Container lifecycle operations

use bollard::container::{
    ListContainersOptions, RemoveContainerOptions, RestartContainerOptions, StopContainerOptions,
};
use tracing::{debug, info, warn};

use crate::core::{ContainerRef, ContainerStatus, DockerError, Result};
use crate::docker::DockerClient;

impl DockerClient {
    /// List containers, optionally including stopped ones
    pub async fn list_containers(&self, all: bool) -> Result<Vec<ContainerRef>> {
        debug!("Listing containers (all={})", all);

        let options = ListContainersOptions::<String> {
            all,
            ..Default::default()
        };

        let containers = self
            .inner()
            .list_containers(Some(options))
            .await
            .map_err(|e: bollard::errors::Error| DockerError::Container(e.to_string()))?;

        info!("Found {} containers", containers.len());

        Ok(containers.into_iter().map(ContainerRef::from).collect())
    }

    /// Start a container
    pub async fn start_container(&self, id: &str) -> Result<()> {
        info!("Starting container: {}", id);

        self.inner()
            .start_container::<String>(id, None)
            .await
            .map_err(|e| DockerError::Container(e.to_string()))?;

        info!("Container {} started successfully", id);
        Ok(())
    }

    /// Stop a container
    pub async fn stop_container(&self, id: &str, timeout: i64) -> Result<()> {
        info!("Stopping container: {} (timeout={}s)", id, timeout);

        self.inner()
            .stop_container(id, Some(StopContainerOptions { t: timeout }))
            .await
            .map_err(|e| DockerError::Container(e.to_string()))?;

        info!("Container {} stopped successfully", id);
        Ok(())
    }

    /// Restart a container
    pub async fn restart_container(&self, id: &str, timeout: i64) -> Result<()> {
        info!("Restarting container: {} (timeout={}s)", id, timeout);

        let options = RestartContainerOptions {
            t: timeout as isize,
        };

        self.inner()
            .restart_container(id, Some(options))
            .await
            .map_err(|e| DockerError::Container(e.to_string()))?;

        info!("Container {} restarted successfully", id);
        Ok(())
    }

    /// Remove a container
    pub async fn remove_container(&self, id: &str, force: bool) -> Result<()> {
        warn!("Removing container: {} (force={})", id, force);

        let options = RemoveContainerOptions {
            v: false,
            force,
            link: false,
        };

        self.inner()
            .remove_container(id, Some(options))
            .await
            .map_err(|e| DockerError::Container(e.to_string()))?;

        info!("Container {} removed successfully", id);
        Ok(())
    }
}

impl From<bollard::models::ContainerSummary> for ContainerRef {
    fn from(c: bollard::models::ContainerSummary) -> Self {
        let id = c.id.unwrap_or_default();

        // The engine reports names with a leading slash
        let name = c
            .names
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|n| n.trim_start_matches('/').to_string())
            .unwrap_or_else(|| id.chars().take(12).collect());

        Self {
            id,
            name,
            image: c.image.unwrap_or_default(),
            status: ContainerStatus::from_state(c.state.as_deref()),
        }
    }
}

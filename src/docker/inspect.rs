//! Docker container inspection

use bollard::models::{
    ContainerInspectResponse, HealthStatusEnum, MountPointTypeEnum, RestartPolicyNameEnum,
};
use tracing::debug;

use crate::core::{
    BindMount, ContainerDetails, ContainerStatus, DockerError, PortBinding, Result,
};
use crate::docker::DockerClient;

impl DockerClient {
    /// Inspect a container and get the metadata shown in previews and menus
    pub async fn inspect_container(&self, id: &str) -> Result<ContainerDetails> {
        debug!("Inspecting container {}", id);

        let inspect = self
            .inner()
            .inspect_container(id, None)
            .await
            .map_err(|e| DockerError::Container(format!("Failed to inspect {}: {}", id, e)))?;

        Ok(ContainerDetails::from(inspect))
    }
}

impl From<ContainerInspectResponse> for ContainerDetails {
    fn from(inspect: ContainerInspectResponse) -> Self {
        let state = inspect.state.unwrap_or_default();
        let state_word = state
            .status
            .map(|s| format!("{:?}", s).to_lowercase());
        let status = ContainerStatus::from_state(state_word.as_deref());

        let status_text = match (status, state.exit_code) {
            (ContainerStatus::Exited, Some(code)) => format!("exited ({})", code),
            _ => state_word.unwrap_or_else(|| "unknown".to_string()),
        };

        // "none" and "" mean no health check is configured
        let health = state
            .health
            .and_then(|h| h.status)
            .filter(|s| !matches!(s, HealthStatusEnum::NONE | HealthStatusEnum::EMPTY))
            .map(|s| format!("{:?}", s).to_lowercase());

        let host_config = inspect.host_config.unwrap_or_default();

        let restart_policy = host_config
            .restart_policy
            .and_then(|rp| rp.name)
            .filter(|name| *name != RestartPolicyNameEnum::EMPTY)
            .map(|name| format!("{:?}", name).to_lowercase().replace('_', "-"));

        let mut ports = Vec::new();
        for (container_port, bindings) in host_config.port_bindings.unwrap_or_default() {
            let bindings = bindings.unwrap_or_default();
            if bindings.is_empty() {
                ports.push(PortBinding {
                    container_port: container_port.clone(),
                    host_port: None,
                });
            }
            for binding in bindings {
                ports.push(PortBinding {
                    container_port: container_port.clone(),
                    host_port: binding.host_port.filter(|p| !p.is_empty()),
                });
            }
        }
        ports.sort_by(|a, b| a.container_port.cmp(&b.container_port));

        let bind_mounts = inspect
            .mounts
            .unwrap_or_default()
            .into_iter()
            .filter(|m| m.typ == Some(MountPointTypeEnum::BIND))
            .map(|m| BindMount {
                source: m.source.unwrap_or_default(),
                destination: m.destination.unwrap_or_default(),
                read_only: m.rw == Some(false),
            })
            .collect();

        let mut networks: Vec<String> = inspect
            .network_settings
            .and_then(|ns| ns.networks)
            .map(|n| n.into_keys().collect())
            .unwrap_or_default();
        networks.sort();

        let created = inspect
            .created
            .as_deref()
            .and_then(|c| chrono::DateTime::parse_from_rfc3339(c).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc));

        Self {
            id: inspect.id.unwrap_or_default().chars().take(12).collect(),
            name: inspect
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            image: inspect
                .config
                .and_then(|c| c.image)
                .unwrap_or_default(),
            status,
            status_text,
            created,
            health,
            restart_policy,
            bind_mounts,
            ports,
            networks,
        }
    }
}

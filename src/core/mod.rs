use chrono::{DateTime, Utc};

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::{ActionResult, ContainerId, LogMode, DEFAULT_LOG_TAIL};

/// Marker rendered for metadata the engine did not report
pub const NOT_APPLICABLE: &str = "N/A";

/// Docker connection information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub version: String,
    pub api_version: String,
    pub os: String,
    pub arch: String,
}

impl Default for ConnectionInfo {
    fn default() -> Self {
        Self {
            version: "unknown".to_string(),
            api_version: "unknown".to_string(),
            os: "unknown".to_string(),
            arch: "unknown".to_string(),
        }
    }
}

/// Container runtime state, reduced to what the selector distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerStatus {
    Running,
    Exited,
    Created,
    Unknown,
}

impl ContainerStatus {
    /// Parse the engine's state word ("running", "exited", ...)
    pub fn from_state(state: Option<&str>) -> Self {
        match state.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("running") => ContainerStatus::Running,
            Some("exited") => ContainerStatus::Exited,
            Some("created") => ContainerStatus::Created,
            _ => ContainerStatus::Unknown,
        }
    }
}

impl std::fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContainerStatus::Running => "Running",
            ContainerStatus::Exited => "Exited",
            ContainerStatus::Created => "Created",
            ContainerStatus::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// One container as seen in a single listing
///
/// Never cached across refreshes: name and status may change after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRef {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
}

impl ContainerRef {
    /// First 12 characters of the id, as the engine CLI shows it
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(12) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}

/// A bind mount from host to container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    pub source: String,
    pub destination: String,
    pub read_only: bool,
}

/// A published port ("80/tcp" bound to host port "8080")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    pub container_port: String,
    pub host_port: Option<String>,
}

/// Inspect metadata used for the preview pane and the action menu header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDetails {
    pub id: ContainerId,
    pub name: String,
    pub image: String,
    pub status: ContainerStatus,
    pub status_text: String,
    pub created: Option<DateTime<Utc>>,
    pub health: Option<String>,
    pub restart_policy: Option<String>,
    pub bind_mounts: Vec<BindMount>,
    pub ports: Vec<PortBinding>,
    pub networks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_status_parse() {
        assert_eq!(ContainerStatus::from_state(Some("running")), ContainerStatus::Running);
        assert_eq!(ContainerStatus::from_state(Some("Exited")), ContainerStatus::Exited);
        assert_eq!(ContainerStatus::from_state(Some("created")), ContainerStatus::Created);
        assert_eq!(ContainerStatus::from_state(Some("paused")), ContainerStatus::Unknown);
        assert_eq!(ContainerStatus::from_state(None), ContainerStatus::Unknown);
    }

    #[test]
    fn test_short_id() {
        let container = ContainerRef {
            id: "abc123def456789".to_string(),
            name: "web".to_string(),
            image: "nginx".to_string(),
            status: ContainerStatus::Running,
        };
        assert_eq!(container.short_id(), "abc123def456");

        let short = ContainerRef {
            id: "abc123".to_string(),
            ..container
        };
        assert_eq!(short.short_id(), "abc123");
    }
}

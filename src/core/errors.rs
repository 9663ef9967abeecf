use thiserror::Error;

/// Main error type for Dockpick
#[derive(Error, Debug)]
pub enum DockPickError {
    /// Docker API errors
    #[error("Docker error: {0}")]
    Docker(#[from] DockerError),

    /// Environment checks that run before the session starts
    #[error("Startup error: {0}")]
    Startup(#[from] StartupError),

    /// Terminal and finder errors
    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Docker-specific errors
#[derive(Error, Debug)]
pub enum DockerError {
    /// Connection errors
    #[error("Failed to connect to Docker: {0}")]
    Connection(String),

    /// Container errors
    #[error("Container error: {0}")]
    Container(String),

    /// Exec errors
    #[error("Exec error: {0}")]
    Exec(String),

    /// Log streaming errors
    #[error("Log error: {0}")]
    Logs(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Commit errors
    #[error("Commit error: {0}")]
    Commit(String),
}

/// Fatal conditions detected before the interactive loop starts
#[derive(Error, Debug)]
pub enum StartupError {
    /// A required executable is not on PATH
    #[error("'{tool}' was not found in PATH")]
    DependencyMissing { tool: String },

    /// The engine CLI exists but the daemon does not answer
    #[error("Docker daemon is not reachable: {0}")]
    EngineUnreachable(String),
}

/// UI-related errors
#[derive(Error, Debug)]
pub enum UiError {
    /// Terminal errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Fuzzy finder errors
    #[error("Finder error: {0}")]
    Finder(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Validation errors
    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DockPickError>;

impl DockPickError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DockPickError::Startup(StartupError::DependencyMissing { tool }) => {
                format!("'{}' is required but was not found. Please install it.", tool)
            }
            DockPickError::Startup(StartupError::EngineUnreachable(_))
            | DockPickError::Docker(DockerError::Connection(_)) => {
                "Could not connect to Docker. Please ensure Docker is running.".to_string()
            }
            DockPickError::Docker(DockerError::Container(msg))
            | DockPickError::Docker(DockerError::Exec(msg))
            | DockPickError::Docker(DockerError::Logs(msg))
            | DockPickError::Docker(DockerError::Export(msg))
            | DockPickError::Docker(DockerError::Commit(msg)) => msg.clone(),
            _ => self.to_string(),
        }
    }
}

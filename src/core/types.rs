//! Core type definitions and shared types

/// Type alias for container IDs
pub type ContainerId = String;

/// Number of lines shown by the default tail log mode
pub const DEFAULT_LOG_TAIL: usize = 50;

/// Outcome of a mutating engine call, always shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResult {
    pub succeeded: bool,
    pub message: String,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            message: message.into(),
        }
    }

    /// Build a result for `action`, formatting the engine error on failure
    pub fn from_outcome<E: std::fmt::Display>(
        action: &str,
        target: &str,
        outcome: std::result::Result<(), E>,
    ) -> Self {
        match outcome {
            Ok(()) => Self::success(format!("{} succeeded for {}", action, target)),
            Err(e) => Self::failure(format!("{} failed: {}", action, e)),
        }
    }
}

/// How much of a container's log to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// The last `n` lines, then stop
    Tail(usize),
    /// Everything, then keep streaming until interrupted
    Follow,
    /// The complete log, then stop
    All,
}

impl Default for LogMode {
    fn default() -> Self {
        LogMode::Tail(DEFAULT_LOG_TAIL)
    }
}

impl LogMode {
    /// Value for the engine's `tail` parameter
    pub fn tail_param(&self) -> String {
        match self {
            LogMode::Tail(n) => n.to_string(),
            LogMode::Follow | LogMode::All => "all".to_string(),
        }
    }

    pub fn follows(&self) -> bool {
        matches!(self, LogMode::Follow)
    }
}

impl std::fmt::Display for LogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogMode::Tail(n) => write!(f, "last {} lines", n),
            LogMode::Follow => write!(f, "follow"),
            LogMode::All => write!(f, "all"),
        }
    }
}

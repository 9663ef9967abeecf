use std::path::PathBuf;

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub finder: FinderConfig,
    #[serde(default)]
    pub exec: ExecConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// General session settings
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// List stopped containers too
    #[serde(default = "default_true")]
    pub include_stopped: bool,
    /// Lines shown by the tail log mode
    #[serde(default = "default_log_tail")]
    pub log_tail: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            include_stopped: true,
            log_tail: default_log_tail(),
        }
    }
}

/// Docker connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    #[serde(default)]
    pub host: Option<String>,
    /// Engine CLI used for interactive exec sessions
    #[serde(default = "default_cli")]
    pub cli: String,
    #[serde(default = "default_stop_timeout")]
    pub stop_timeout_secs: i64,
    #[serde(default)]
    pub force_remove: bool,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            host: None,
            cli: default_cli(),
            stop_timeout_secs: default_stop_timeout(),
            force_remove: false,
        }
    }
}

/// Fuzzy finder settings
#[derive(Debug, Clone, Deserialize)]
pub struct FinderConfig {
    #[serde(default = "default_finder")]
    pub binary: String,
    #[serde(default = "default_height")]
    pub height: String,
    #[serde(default = "default_preview_window")]
    pub preview_window: String,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            binary: default_finder(),
            height: default_height(),
            preview_window: default_preview_window(),
            prompt: default_prompt(),
        }
    }
}

/// Exec settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExecConfig {
    /// Shells tried in order for the interactive shell action
    #[serde(default = "default_shells")]
    pub shells: Vec<String>,
    /// Split custom commands on whitespace instead of passing one token
    #[serde(default = "default_true")]
    pub split_custom_command: bool,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            shells: default_shells(),
            split_custom_command: true,
        }
    }
}

/// UI customization settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub icons: StatusIcons,
    #[serde(default)]
    pub colors: CustomColors,
}

/// Icons prefixed to each container row
#[derive(Debug, Clone, Deserialize)]
pub struct StatusIcons {
    #[serde(default = "default_icon_running")]
    pub running: String,
    #[serde(default = "default_icon_exited")]
    pub exited: String,
    #[serde(default = "default_icon_created")]
    pub created: String,
    #[serde(default = "default_icon_unknown")]
    pub unknown: String,
}

impl Default for StatusIcons {
    fn default() -> Self {
        Self {
            running: default_icon_running(),
            exited: default_icon_exited(),
            created: default_icon_created(),
            unknown: default_icon_unknown(),
        }
    }
}

/// Dotted style strings, e.g. "green.bold"
#[derive(Debug, Clone, Deserialize)]
pub struct CustomColors {
    #[serde(default = "default_title_style")]
    pub title: String,
    #[serde(default = "default_label_style")]
    pub label: String,
    #[serde(default = "default_key_style")]
    pub key: String,
    #[serde(default = "default_success_style")]
    pub success: String,
    #[serde(default = "default_failure_style")]
    pub failure: String,
    #[serde(default = "default_notice_style")]
    pub notice: String,
}

impl Default for CustomColors {
    fn default() -> Self {
        Self {
            title: default_title_style(),
            label: default_label_style(),
            key: default_key_style(),
            success: default_success_style(),
            failure: default_failure_style(),
            notice: default_notice_style(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_log_tail() -> usize {
    crate::core::DEFAULT_LOG_TAIL
}

fn default_cli() -> String {
    "docker".to_string()
}

fn default_stop_timeout() -> i64 {
    10
}

fn default_finder() -> String {
    "fzf".to_string()
}

fn default_height() -> String {
    "80%".to_string()
}

fn default_preview_window() -> String {
    "right:50%:wrap".to_string()
}

fn default_prompt() -> String {
    "container> ".to_string()
}

fn default_shells() -> Vec<String> {
    vec!["/bin/bash".to_string(), "/bin/sh".to_string()]
}

fn default_icon_running() -> String {
    "🟢".to_string()
}

fn default_icon_exited() -> String {
    "🔴".to_string()
}

fn default_icon_created() -> String {
    "🟡".to_string()
}

fn default_icon_unknown() -> String {
    "⚪".to_string()
}

fn default_title_style() -> String {
    "cyan.bold".to_string()
}

fn default_label_style() -> String {
    "bold".to_string()
}

fn default_key_style() -> String {
    "yellow".to_string()
}

fn default_success_style() -> String {
    "green".to_string()
}

fn default_failure_style() -> String {
    "red.bold".to_string()
}

fn default_notice_style() -> String {
    "yellow.dim".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.general.include_stopped);
        assert_eq!(config.general.log_tail, 50);
        assert_eq!(config.docker.cli, "docker");
        assert_eq!(config.finder.binary, "fzf");
        assert_eq!(config.exec.shells, vec!["/bin/bash", "/bin/sh"]);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[docker]\nforce_remove = true\n").unwrap();
        assert!(config.docker.force_remove);
        assert_eq!(config.docker.stop_timeout_secs, 10);
        assert_eq!(config.ui.icons.running, "🟢");
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tracing::{debug, info};

pub mod model;

pub use model::*;

use crate::ui::Theme;

const LOCAL_CONFIG: &str = "dockpick.toml";

impl Config {
    /// Load configuration from a specific file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        debug!("Configuration loaded and validated successfully");

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load(&config_path);
            }
        }

        // Try current directory
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Self::load(&local_config);
        }

        info!("No configuration file found, using defaults");
        Ok(Config::default())
    }

    /// `<config dir>/config.toml` for this user, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        use directories::ProjectDirs;

        ProjectDirs::from("com", "dockpick", "dockpick")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.general.log_tail == 0 {
            anyhow::bail!("log_tail must be at least 1");
        }

        if self.docker.cli.trim().is_empty() {
            anyhow::bail!("docker.cli must not be empty");
        }

        if self.docker.stop_timeout_secs < 0 {
            anyhow::bail!("stop_timeout_secs must not be negative");
        }

        if self.finder.binary.trim().is_empty() {
            anyhow::bail!("finder.binary must not be empty");
        }

        if self.exec.shells.iter().all(|s| s.trim().is_empty()) {
            anyhow::bail!("exec.shells must name at least one shell");
        }

        Theme::from_config(&self.ui).context("Invalid ui.colors entry")?;

        Ok(())
    }
}

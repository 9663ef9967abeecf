//! Immutable styling built once from `[ui]` configuration.

use console::Style;

use crate::config::{StatusIcons, UiConfig};
use crate::core::{ConfigError, ContainerStatus, Result};

const COLORS: &[&str] = &[
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

const ATTRIBUTES: &[&str] = &[
    "bold",
    "dim",
    "italic",
    "underlined",
    "blink",
    "blink_fast",
    "reverse",
    "hidden",
    "strikethrough",
    "bright",
    "on_bright",
];

/// Styles used by every renderer in the session
#[derive(Debug, Clone)]
pub struct Theme {
    title: Style,
    label: Style,
    key: Style,
    success: Style,
    failure: Style,
    notice: Style,
    icons: StatusIcons,
}

impl Theme {
    pub fn from_config(config: &UiConfig) -> Result<Self> {
        let colors = &config.colors;
        Ok(Self {
            title: parse_style("title", &colors.title)?,
            label: parse_style("label", &colors.label)?,
            key: parse_style("key", &colors.key)?,
            success: parse_style("success", &colors.success)?,
            failure: parse_style("failure", &colors.failure)?,
            notice: parse_style("notice", &colors.notice)?,
            icons: config.icons.clone(),
        })
    }

    pub fn icon(&self, status: ContainerStatus) -> &str {
        match status {
            ContainerStatus::Running => &self.icons.running,
            ContainerStatus::Exited => &self.icons.exited,
            ContainerStatus::Created => &self.icons.created,
            ContainerStatus::Unknown => &self.icons.unknown,
        }
    }

    pub fn title(&self, text: &str) -> String {
        self.title.apply_to(text).to_string()
    }

    pub fn label(&self, text: &str) -> String {
        self.label.apply_to(text).to_string()
    }

    pub fn key(&self, text: &str) -> String {
        self.key.apply_to(text).to_string()
    }

    pub fn success(&self, text: &str) -> String {
        self.success.apply_to(text).to_string()
    }

    pub fn failure(&self, text: &str) -> String {
        self.failure.apply_to(text).to_string()
    }

    pub fn notice(&self, text: &str) -> String {
        self.notice.apply_to(text).to_string()
    }

    /// No colors or attributes, default icons
    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            label: Style::new(),
            key: Style::new(),
            success: Style::new(),
            failure: Style::new(),
            notice: Style::new(),
            icons: StatusIcons::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&UiConfig::default()).unwrap_or_else(|_| Self::plain())
    }
}

/// Accept only the words `console` understands, so typos surface at startup
fn parse_style(field: &str, dotted: &str) -> Result<Style> {
    for part in dotted.split('.').filter(|p| !p.is_empty()) {
        let color = part.strip_prefix("on_").unwrap_or(part);
        let known = ATTRIBUTES.contains(&part)
            || COLORS.contains(&color)
            || color.parse::<u8>().is_ok();
        if !known {
            return Err(ConfigError::Validation(format!(
                "unknown style '{}' in ui.colors.{}",
                part, field
            ))
            .into());
        }
    }
    Ok(Style::from_dotted_str(dotted))
}

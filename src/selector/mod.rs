//! Container selection through the fuzzy finder

pub mod finder;

use std::path::PathBuf;

use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use crate::core::{ContainerRef, Result};
use crate::ui::Theme;

pub use finder::{Finder, FinderRequest, Fzf};

#[cfg(test)]
pub use finder::MockFinder;

/// Outcome of one selection round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(ContainerRef),
    /// The user closed the finder without choosing
    Cancelled,
    /// There was nothing to choose from
    Empty,
}

/// How the finder calls back into this binary for a row preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCommand {
    pub program: PathBuf,
    pub host: Option<String>,
    pub config: Option<PathBuf>,
}

impl PreviewCommand {
    /// Preview via the currently running executable
    pub fn current(host: Option<String>, config: Option<PathBuf>) -> Self {
        let program = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("dockpick"));
        Self {
            program,
            host,
            config,
        }
    }

    /// Shell command line for the finder; `{1}` is the highlighted row's id
    pub fn to_shell(&self) -> String {
        let mut parts = vec![shell_quote(&self.program.to_string_lossy())];
        if let Some(host) = &self.host {
            parts.push("--host".to_string());
            parts.push(shell_quote(host));
        }
        if let Some(config) = &self.config {
            parts.push("--config".to_string());
            parts.push(shell_quote(&config.to_string_lossy()));
        }
        parts.push("preview".to_string());
        parts.push("{1}".to_string());
        parts.join(" ")
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Renders containers as finder rows and maps the pick back to a container
pub struct Selector<F: Finder> {
    finder: F,
    preview: PreviewCommand,
    theme: Theme,
}

impl<F: Finder> Selector<F> {
    pub fn new(finder: F, preview: PreviewCommand, theme: Theme) -> Self {
        Self {
            finder,
            preview,
            theme,
        }
    }

    /// Let the user pick exactly one of `containers`
    pub async fn select_one(&self, containers: &[ContainerRef]) -> Result<Selection> {
        if containers.is_empty() {
            debug!("Nothing to select");
            return Ok(Selection::Empty);
        }

        let request = FinderRequest {
            rows: render_rows(containers, &self.theme),
            header: "ID\tSTATUS NAME\tIMAGE".to_string(),
            preview: self.preview.to_shell(),
        };

        let Some(line) = self.finder.pick(&request).await? else {
            return Ok(Selection::Cancelled);
        };

        match resolve_row(containers, &line) {
            Some(container) => {
                debug!("Selected container {} ({})", container.name, container.id);
                Ok(Selection::Chosen(container.clone()))
            }
            None => {
                warn!("Finder returned a row that matches no container: {:?}", line);
                Ok(Selection::Cancelled)
            }
        }
    }
}

/// `<short id>\t<icon> <name>\t<image>`, names padded to one column width
pub fn render_rows(containers: &[ContainerRef], theme: &Theme) -> Vec<String> {
    let width = containers
        .iter()
        .map(|c| UnicodeWidthStr::width(c.name.as_str()))
        .max()
        .unwrap_or(0);

    containers
        .iter()
        .map(|c| {
            let pad = width - UnicodeWidthStr::width(c.name.as_str());
            format!(
                "{}\t{} {}{}\t{}",
                c.short_id(),
                theme.icon(c.status),
                c.name,
                " ".repeat(pad),
                c.image
            )
        })
        .collect()
}

/// Map a chosen row back to its container by the leading id field
fn resolve_row<'a>(containers: &'a [ContainerRef], line: &str) -> Option<&'a ContainerRef> {
    let key = line.split('\t').next()?.trim();
    if key.is_empty() {
        return None;
    }
    containers
        .iter()
        .find(|c| c.short_id() == key || c.id == key)
}

//! External fuzzy finder process

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::FinderConfig;
use crate::core::{Result, UiError};

/// fzf exits with 1 when nothing matched and 130 when the user aborted
const EXIT_NO_MATCH: i32 = 1;
const EXIT_ABORTED: i32 = 130;

/// What the finder should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderRequest {
    /// Tab-separated rows; the first field is the row key
    pub rows: Vec<String>,
    pub header: String,
    /// Shell command run per highlighted row, `{1}` replaced by its key
    pub preview: String,
}

/// The fuzzy-selection collaborator: show rows, return the chosen one
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Finder: Send + Sync {
    /// `None` when the user cancelled without choosing
    async fn pick(&self, request: &FinderRequest) -> Result<Option<String>>;
}

/// `Finder` backed by an `fzf`-compatible binary
pub struct Fzf {
    config: FinderConfig,
}

impl Fzf {
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    fn args(&self, request: &FinderRequest) -> Vec<String> {
        vec![
            "--ansi".to_string(),
            "--no-multi".to_string(),
            "--layout=reverse".to_string(),
            "--delimiter=\t".to_string(),
            format!("--height={}", self.config.height),
            format!("--prompt={}", self.config.prompt),
            format!("--header={}", request.header),
            format!("--preview={}", request.preview),
            format!("--preview-window={}", self.config.preview_window),
        ]
    }
}

#[async_trait]
impl Finder for Fzf {
    async fn pick(&self, request: &FinderRequest) -> Result<Option<String>> {
        debug!("Launching {} with {} rows", self.config.binary, request.rows.len());

        let mut child = tokio::process::Command::new(&self.config.binary)
            .args(self.args(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                UiError::Finder(format!("Failed to launch {}: {}", self.config.binary, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let mut input = request.rows.join("\n");
            input.push('\n');
            // The finder may close before reading every row
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let output = child.wait_with_output().await?;
        match output.status.code() {
            Some(0) => {
                let chosen = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .map(str::to_string)
                    .filter(|l| !l.trim().is_empty());
                Ok(chosen)
            }
            Some(EXIT_NO_MATCH) | Some(EXIT_ABORTED) => {
                info!("Finder closed without a selection");
                Ok(None)
            }
            code => Err(UiError::Finder(format!(
                "{} exited with {:?}",
                self.config.binary, code
            ))
            .into()),
        }
    }
}

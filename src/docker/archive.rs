//! Export a container filesystem, commit a container to an image

use std::path::Path;

use bollard::container::Config;
use bollard::image::CommitContainerOptions;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::core::{DockerError, Result};
use crate::docker::DockerClient;

impl DockerClient {
    /// Stream the container filesystem as a tar archive into `path`
    ///
    /// The archive is staged next to `path` and renamed over it only once the
    /// engine has sent everything, so a failed or dropped export leaves any
    /// existing file untouched. Returns the number of bytes written.
    pub async fn export_container(&self, id: &str, path: &Path) -> Result<u64> {
        info!("Exporting container {} to {}", id, path.display());

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = tempfile::Builder::new()
            .prefix(".dockpick-export-")
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| {
                DockerError::Export(format!("Cannot create a file in {}: {}", dir.display(), e))
            })?;
        let write_error = |e: std::io::Error| {
            DockerError::Export(format!("Cannot write {}: {}", path.display(), e))
        };

        let handle = staging.as_file().try_clone().map_err(write_error)?;
        let mut file = tokio::fs::File::from_std(handle);
        let mut stream = self.inner().export_container(id);
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DockerError::Export(e.to_string()))?;
            file.write_all(&chunk).await.map_err(write_error)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(write_error)?;
        drop(file);

        staging.persist(path).map_err(|e| write_error(e.error))?;

        info!("Exported {} bytes from {}", written, id);
        Ok(written)
    }

    /// Create image `repo:tag` from the container's current filesystem
    pub async fn commit_container(&self, id: &str, repo: &str, tag: &str) -> Result<()> {
        info!("Committing container {} as {}:{}", id, repo, tag);

        let options = CommitContainerOptions {
            container: id.to_string(),
            repo: repo.to_string(),
            tag: tag.to_string(),
            pause: true,
            ..Default::default()
        };

        self.inner()
            .commit_container(options, Config::<String>::default())
            .await
            .map_err(|e| DockerError::Commit(e.to_string()))?;

        debug!("Commit of {} finished", id);
        Ok(())
    }
}

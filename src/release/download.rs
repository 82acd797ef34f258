//! Streaming artifact download with atomic replacement.

use super::client::download_client;
use super::resolver::ResolvedArtifact;
use crate::config::NetworkConfig;
use crate::core::{LoomError, Result};
use crate::utils::fs::{READABLE_MODE, set_mode};
use crate::utils::progress::ProgressBar;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

/// Downloads a resolved artifact to its final location.
///
/// The body is streamed into a temporary file in the destination directory.
/// Only a complete download is renamed over the destination, so a failed or
/// interrupted run leaves the previously installed artifact in place.
pub struct ArtifactDownloader<'a> {
    network: &'a NetworkConfig,
    show_progress: bool,
}

impl<'a> ArtifactDownloader<'a> {
    #[must_use]
    pub const fn new(network: &'a NetworkConfig, show_progress: bool) -> Self {
        Self {
            network,
            show_progress,
        }
    }

    /// Downloads `artifact` to `destination` and returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// - [`LoomError::NetworkError`] on transport failure or timeout
    /// - [`LoomError::DownloadStatus`] on a non-success HTTP status
    /// - [`LoomError::IncompleteDownload`] if fewer bytes arrive than announced
    /// - [`LoomError::PermissionDenied`] if the destination cannot be written
    pub async fn download(&self, artifact: &ResolvedArtifact, destination: &Path) -> Result<u64> {
        let url = artifact.url.as_str();
        tracing::debug!("downloading {url} to {}", destination.display());

        let mut response = download_client(self.network)?
            .get(url)
            .send()
            .await
            .map_err(|e| LoomError::network("download the artifact", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoomError::DownloadStatus {
                url: url.to_string(),
                status: status.to_string(),
            });
        }

        let expected = response.content_length().or(artifact.size);
        let dir = destination.parent().unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(dir)
            .map_err(|e| LoomError::permission("create a temporary file in", dir, &e))?;
        let handle =
            temp.as_file().try_clone().map_err(|e| LoomError::permission("write", temp.path(), &e))?;
        let mut file = tokio::fs::File::from_std(handle);

        let progress = ProgressBar::new_download(expected, self.show_progress);
        progress.set_prefix(artifact.name.clone());

        let mut written: u64 = 0;
        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    progress.abandon();
                    // a body cut short of its Content-Length surfaces as a transport error
                    if let Some(expected) = expected.filter(|&n| written < n) {
                        tracing::debug!("stream ended with error: {e}");
                        return Err(incomplete(destination, expected, written));
                    }
                    return Err(LoomError::network("download the artifact", e));
                }
            };
            file.write_all(&chunk)
                .await
                .map_err(|e| LoomError::permission("write", temp.path(), &e))?;
            written += chunk.len() as u64;
            progress.inc(chunk.len() as u64);
        }
        progress.finish_and_clear();

        if let Some(expected) = expected.filter(|&n| n != written) {
            return Err(incomplete(destination, expected, written));
        }

        file.flush().await.map_err(|e| LoomError::permission("write", temp.path(), &e))?;
        file.sync_all().await.map_err(|e| LoomError::permission("sync", temp.path(), &e))?;
        drop(file);

        temp.persist(destination)
            .map_err(|e| LoomError::permission("replace", destination, &e.error))?;
        set_mode(destination, READABLE_MODE)?;

        tracing::info!("downloaded {written} bytes to {}", destination.display());
        Ok(written)
    }
}

fn incomplete(destination: &Path, expected: u64, actual: u64) -> LoomError {
    LoomError::IncompleteDownload {
        path: destination.display().to_string(),
        expected,
        actual,
    }
}

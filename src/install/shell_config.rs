//! Appending the PATH entry to a shell startup file.

use crate::constants::{PATH_EXPORT_LINE, PATH_MARKER};
use crate::core::{LoomError, Result};
use crate::utils::fs::ensure_parent_dir;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// What the patcher did to the startup file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The file already puts the launcher directory on PATH.
    AlreadyPresent,
    /// The PATH line was appended.
    Appended,
}

/// Returns true when `content` already puts `~/.klang/bin` on PATH.
///
/// A line counts when it is exactly the export line, or when it is not a
/// comment and mentions the bin directory as a whole path segment, so
/// `~/.klang/binaries` does not count. Comments never count.
///
/// # Examples
///
/// ```rust
/// use loom_cli::install::has_path_entry;
///
/// assert!(has_path_entry("export PATH=\"$HOME/.klang/bin:$PATH\"\n"));
/// assert!(has_path_entry("fish_add_path ~/.klang/bin\n"));
/// assert!(!has_path_entry("# export PATH=\"$HOME/.klang/bin:$PATH\"\n"));
/// ```
#[must_use]
pub fn has_path_entry(content: &str) -> bool {
    content.lines().map(str::trim).any(|line| {
        line == PATH_EXPORT_LINE || (!line.starts_with('#') && mentions_bin_dir(line))
    })
}

fn mentions_bin_dir(line: &str) -> bool {
    line.match_indices(PATH_MARKER).any(|(start, _)| {
        line[start + PATH_MARKER.len()..]
            .chars()
            .next()
            .is_none_or(|c| matches!(c, ':' | '"' | '\'' | '/') || c.is_whitespace())
    })
}

/// Idempotently adds the PATH line to a startup file.
pub struct ShellConfigPatcher<'a> {
    config_path: &'a Path,
}

impl<'a> ShellConfigPatcher<'a> {
    #[must_use]
    pub const fn new(config_path: &'a Path) -> Self {
        Self {
            config_path,
        }
    }

    /// Appends the PATH line unless an entry is already present.
    ///
    /// A missing file is treated as empty and created together with its
    /// parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or appended to. Callers
    /// treat this as a warning.
    pub async fn patch(&self) -> Result<PatchOutcome> {
        let path = self.config_path;
        let existing = match tokio::fs::read(path).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(LoomError::permission("read", path, &e)),
        };

        if has_path_entry(&existing) {
            tracing::debug!("{} already has a PATH entry", path.display());
            return Ok(PatchOutcome::AlreadyPresent);
        }

        ensure_parent_dir(path)?;

        let mut addition = String::new();
        if !existing.is_empty() && !existing.ends_with('\n') {
            addition.push('\n');
        }
        addition.push_str(PATH_EXPORT_LINE);
        addition.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|e| LoomError::permission("open", path, &e))?;
        file.write_all(addition.as_bytes())
            .await
            .map_err(|e| LoomError::permission("append to", path, &e))?;
        file.flush().await.map_err(|e| LoomError::permission("append to", path, &e))?;

        tracing::info!("added PATH entry to {}", path.display());
        Ok(PatchOutcome::Appended)
    }
}

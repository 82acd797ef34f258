//! The `kc` launcher script.

use crate::core::Result;
use crate::utils::fs::{EXECUTABLE_MODE, safe_write, set_mode};
use std::path::{Path, PathBuf};

/// A launcher script and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherArtifact {
    /// Destination of the script.
    pub path: PathBuf,
    /// Full script text.
    pub content: String,
    /// Permission bits applied after writing.
    pub mode: u32,
}

impl LauncherArtifact {
    /// Builds the launcher that runs `artifact` with `java -jar`, forwarding
    /// all arguments.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loom_cli::install::LauncherArtifact;
    /// use std::path::Path;
    ///
    /// let launcher = LauncherArtifact::for_artifact(
    ///     Path::new("/h/.klang/bin/kc"),
    ///     Path::new("/h/.klang/active/klang.jar"),
    /// );
    /// assert_eq!(
    ///     launcher.content,
    ///     "#!/bin/sh\nexec java -jar '/h/.klang/active/klang.jar' \"$@\"\n"
    /// );
    /// ```
    #[must_use]
    pub fn for_artifact(path: &Path, artifact: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            content: format!(
                "#!/bin/sh\nexec java -jar {} \"$@\"\n",
                shell_quote(&artifact.display().to_string())
            ),
            mode: EXECUTABLE_MODE,
        }
    }
}

/// Quotes `value` as a single `sh` word with no expansion.
///
/// Embedded single quotes become `'\''`.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Writes a [`LauncherArtifact`] to disk.
pub struct LauncherWriter;

impl LauncherWriter {
    /// Writes the script atomically, replacing any previous launcher, then
    /// marks it executable.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LoomError::PermissionDenied`] if either the write
    /// or the chmod fails.
    pub fn write(launcher: &LauncherArtifact) -> Result<()> {
        safe_write(&launcher.path, &launcher.content)?;
        set_mode(&launcher.path, launcher.mode)?;
        tracing::debug!("launcher written to {}", launcher.path.display());
        Ok(())
    }
}

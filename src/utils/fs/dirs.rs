//! Directory creation helpers.
//!
//! Failures are reported as [`LoomError::PermissionDenied`] naming the
//! directory, since lacking write access is by far the most common cause.

use crate::core::{LoomError, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Calling this on an existing directory is a no-op, which keeps repeated
/// installs idempotent.
///
/// # Errors
///
/// - [`LoomError::PermissionDenied`] if creation fails
/// - [`LoomError::PermissionDenied`] if the path exists but is not a directory
///
/// # Examples
///
/// ```rust,no_run
/// use loom_cli::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> loom_cli::core::Result<()> {
/// ensure_dir(Path::new("/home/user/.klang/bin"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| LoomError::permission("create directory", path, &e))?;
    } else if !path.is_dir() {
        return Err(LoomError::PermissionDenied {
            operation: "create directory".to_string(),
            path: path.display().to_string(),
            reason: "path exists but is not a directory".to_string(),
        });
    }
    tracing::trace!("directory ready: {}", path.display());
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
///
/// Paths without a parent (e.g. a bare file name) are accepted as-is.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

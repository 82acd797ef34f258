//! Unix permission bits for installed files.

use crate::core::{LoomError, Result};
use std::path::Path;

/// Mode of the launcher script: rwxr-xr-x.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Mode of the downloaded artifact: rw-r--r--.
pub const READABLE_MODE: u32 = 0o644;

/// Sets the permission bits of `path` to `mode`.
///
/// On non-Unix platforms this is a no-op.
///
/// # Errors
///
/// Returns [`LoomError::PermissionDenied`] if the chmod fails.
#[cfg(unix)]
pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| LoomError::permission("change permissions of", path, &e))
}

#[cfg(not(unix))]
pub fn set_mode(path: &Path, _mode: u32) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(LoomError::PermissionDenied {
            operation: "change permissions of".to_string(),
            path: path.display().to_string(),
            reason: "file does not exist".to_string(),
        })
    }
}

//! Atomic file write operations using temp-and-rename strategy.
//!
//! This module provides safe, atomic file writing so that an interrupted run
//! never leaves a half-written launcher or marker file behind.

use crate::core::{LoomError, Result};
use crate::utils::fs::dirs::ensure_parent_dir;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// This function ensures atomic writes by:
/// 1. Writing content to a temporary file next to the target
/// 2. Syncing the temporary file to disk
/// 3. Renaming the temporary file over the target path
///
/// Readers therefore observe either the previous content or the new content.
/// Parent directories are created when missing.
///
/// # Errors
///
/// Returns [`LoomError::PermissionDenied`] if any step fails.
///
/// # Examples
///
/// ```rust,no_run
/// use loom_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> loom_cli::core::Result<()> {
/// atomic_write(Path::new("/home/user/.klang/version/current"), b"v0.4.0\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp =
        NamedTempFile::new_in(dir).map_err(|e| LoomError::permission("write file", path, &e))?;
    temp.write_all(content).map_err(|e| LoomError::permission("write file", path, &e))?;
    temp.as_file().sync_all().map_err(|e| LoomError::permission("write file", path, &e))?;
    temp.persist(path).map_err(|e| LoomError::permission("write file", path, &e.error))?;

    Ok(())
}

/// Convenience wrapper around [`atomic_write`] for string content.
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("version/current");

        safe_write(&file, "v1.0.0\n").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "v1.0.0\n");
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("kc");

        atomic_write(&file, b"old").unwrap();
        atomic_write(&file, b"new").unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), b"new");

        // no temp files left behind
        let entries: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}

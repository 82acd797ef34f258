//! Directory provisioning.

use super::paths::InstallPaths;
use crate::core::Result;
use crate::utils::fs::ensure_dir;

/// Creates the installation directories.
pub struct DirectoryProvisioner<'a> {
    paths: &'a InstallPaths,
}

impl<'a> DirectoryProvisioner<'a> {
    #[must_use]
    pub const fn new(paths: &'a InstallPaths) -> Self {
        Self {
            paths,
        }
    }

    /// Creates base, bin, version and active in that order.
    ///
    /// Existing directories are accepted. The first failure aborts provisioning
    /// and names the offending directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LoomError::PermissionDenied`] for the first
    /// directory that cannot be created.
    pub fn provision(&self) -> Result<()> {
        for dir in self.paths.all() {
            ensure_dir(dir)?;
            tracing::debug!("provisioned {}", dir.display());
        }
        Ok(())
    }
}

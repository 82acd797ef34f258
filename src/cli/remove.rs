//! `loom remove`

use super::CliConfig;
use crate::constants::{INSTALLER_BINARY_NAME, SYSTEM_BIN_DIR};
use crate::core::{LoomError, Result as LoomResult};
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

/// Remove the loom binary
///
/// The Klang installation in ~/.klang is left in place.
#[derive(Args, Debug, Default)]
pub struct RemoveCommand {}

impl RemoveCommand {
    /// Deletes the first loom binary found.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::PermissionDenied`] if the binary cannot be deleted.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let status = config.status();
        let home = crate::utils::platform::get_home_dir().ok();
        let candidates = candidates(home.as_deref());

        match remove_first_existing(&candidates).await? {
            Some(path) => status.success(format!("Removed loom from {}", path.display())),
            None => {
                let searched: Vec<String> =
                    candidates.iter().map(|p| p.display().to_string()).collect();
                status.info(format!(
                    "loom is probably not installed (looked in {})",
                    searched.join(", ")
                ));
            }
        }
        Ok(())
    }
}

/// Locations loom may have been installed to, in lookup order.
///
/// Without a home directory only the system location is checked.
#[must_use]
pub fn candidates(home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![Path::new(SYSTEM_BIN_DIR).join(INSTALLER_BINARY_NAME)];
    if let Some(home) = home {
        paths.push(home.join(".local").join("bin").join(INSTALLER_BINARY_NAME));
    }
    paths
}

/// Deletes the first existing path and returns it.
async fn remove_first_existing(candidates: &[PathBuf]) -> LoomResult<Option<PathBuf>> {
    let Some(path) = candidates.iter().find(|p| p.exists()) else {
        return Ok(None);
    };
    tracing::debug!("removing {}", path.display());
    tokio::fs::remove_file(path).await.map_err(|e| LoomError::permission("remove", path, &e))?;
    Ok(Some(path.clone()))
}

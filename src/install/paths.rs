//! Installation layout below the user's home directory.

use crate::constants::{
    ACTIVE_DIR_NAME, ARTIFACT_NAME, BIN_DIR_NAME, LAUNCHER_NAME, TOOL_DIR_NAME, VERSION_DIR_NAME,
    VERSION_MARKER_NAME,
};
use crate::core::Result;
use std::path::{Path, PathBuf};

/// The four directories of a Klang installation.
///
/// All of them are derived from the home directory, so two runs by the same
/// user always agree on the layout:
///
/// ```text
/// ~/.klang/
/// ├── bin/kc              launcher on PATH
/// ├── version/current     installed release tag
/// └── active/klang.jar    the toolchain artifact
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    /// `~/.klang`
    pub base: PathBuf,
    /// `~/.klang/bin`
    pub bin: PathBuf,
    /// `~/.klang/version`
    pub version: PathBuf,
    /// `~/.klang/active`
    pub active: PathBuf,
}

impl InstallPaths {
    /// Derives the layout from an explicit home directory.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loom_cli::install::InstallPaths;
    /// use std::path::Path;
    ///
    /// let paths = InstallPaths::from_home(Path::new("/home/ada"));
    /// assert_eq!(paths.launcher(), Path::new("/home/ada/.klang/bin/kc"));
    /// assert_eq!(paths.artifact(), Path::new("/home/ada/.klang/active/klang.jar"));
    /// ```
    #[must_use]
    pub fn from_home(home: &Path) -> Self {
        let base = home.join(TOOL_DIR_NAME);
        Self {
            bin: base.join(BIN_DIR_NAME),
            version: base.join(VERSION_DIR_NAME),
            active: base.join(ACTIVE_DIR_NAME),
            base,
        }
    }

    /// Derives the layout for the current user.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LoomError::UserResolution`] if the home directory
    /// cannot be determined.
    pub fn resolve() -> Result<Self> {
        let home = crate::utils::platform::get_home_dir()?;
        Ok(Self::from_home(&home))
    }

    /// Directories in creation order: base, bin, version, active.
    #[must_use]
    pub fn all(&self) -> [&Path; 4] {
        [&self.base, &self.bin, &self.version, &self.active]
    }

    /// Path of the launcher script.
    #[must_use]
    pub fn launcher(&self) -> PathBuf {
        self.bin.join(LAUNCHER_NAME)
    }

    /// Path of the installed artifact.
    #[must_use]
    pub fn artifact(&self) -> PathBuf {
        self.active.join(ARTIFACT_NAME)
    }

    /// Path of the file recording the installed release tag.
    #[must_use]
    pub fn version_marker(&self) -> PathBuf {
        self.version.join(VERSION_MARKER_NAME)
    }

    /// Reads the installed release tag, if one was recorded.
    pub async fn installed_tag(&self) -> Option<String> {
        let content = tokio::fs::read_to_string(self.version_marker()).await.ok()?;
        let tag = content.trim();
        (!tag.is_empty()).then(|| tag.to_string())
    }
}

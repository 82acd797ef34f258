//! Global configuration for loom.
//!
//! The configuration file is optional. Every field has a default that points at
//! the public Klang releases, so most users never create one. It exists for
//! mirrors, forks and slow networks.
//!
//! # Location
//!
//! - `--config PATH` or the `LOOM_CONFIG` environment variable
//! - otherwise `~/.klang/config.toml`
//!
//! # File Format
//!
//! ```toml
//! [release]
//! api_url = "https://api.github.com"
//! owner = "KlangLang"
//! repo = "Klang"
//! asset = "klang.jar"
//! selection = "first"            # or "highest-semver"
//!
//! [network]
//! api_timeout_secs = 10
//! download_timeout_secs = 600
//! connect_timeout_secs = 10
//! ```

use crate::constants::{
    ARTIFACT_NAME, CONFIG_FILE_NAME, CONNECT_TIMEOUT, DEFAULT_API_URL, DEFAULT_REPO_NAME,
    DEFAULT_REPO_OWNER, DOWNLOAD_TIMEOUT, RELEASE_API_TIMEOUT, TOOL_DIR_NAME,
};
use crate::core::{LoomError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// How the release to install is chosen when no tag is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseSelection {
    /// The first release returned by the API, pre-releases included.
    #[default]
    First,
    /// The release whose tag is the highest semantic version.
    HighestSemver,
}

/// Where releases are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Base URL of the GitHub-compatible API.
    pub api_url: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Exact name of the release asset to install.
    pub asset: String,
    /// Selection strategy for the latest release.
    pub selection: ReleaseSelection,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            owner: DEFAULT_REPO_OWNER.to_string(),
            repo: DEFAULT_REPO_NAME.to_string(),
            asset: ARTIFACT_NAME.to_string(),
            selection: ReleaseSelection::First,
        }
    }
}

impl ReleaseConfig {
    /// `owner/repo`, used in messages.
    #[must_use]
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// URL of the release listing endpoint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loom_cli::config::ReleaseConfig;
    ///
    /// let config = ReleaseConfig::default();
    /// assert_eq!(
    ///     config.releases_url(),
    ///     "https://api.github.com/repos/KlangLang/Klang/releases"
    /// );
    /// ```
    #[must_use]
    pub fn releases_url(&self) -> String {
        format!("{}/repos/{}/{}/releases", self.api_url.trim_end_matches('/'), self.owner, self.repo)
    }
}

/// Network timeouts, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Timeout of the release listing request.
    pub api_timeout_secs: u64,
    /// Timeout of the whole artifact download.
    pub download_timeout_secs: u64,
    /// Timeout for establishing a connection.
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_timeout_secs: RELEASE_API_TIMEOUT.as_secs(),
            download_timeout_secs: DOWNLOAD_TIMEOUT.as_secs(),
            connect_timeout_secs: CONNECT_TIMEOUT.as_secs(),
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub const fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    #[must_use]
    pub const fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Global configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Release source settings.
    pub release: ReleaseConfig,
    /// Network timeouts.
    pub network: NetworkConfig,
}

impl GlobalConfig {
    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// - [`LoomError::UserResolution`] if the home directory is unknown
    /// - [`LoomError::ConfigError`] if the file exists but is malformed
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load configuration from `path` if given, else from the default location.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::ConfigError`] if the file exists but cannot be read
    /// or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("no configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::ConfigError`] if the file cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use loom_cli::config::GlobalConfig;
    /// use std::path::Path;
    ///
    /// # async fn example() -> loom_cli::core::Result<()> {
    /// let config = GlobalConfig::load_from(Path::new("/etc/loom.toml")).await?;
    /// println!("Installing from {}", config.release.repository());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| LoomError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| LoomError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration path: `~/.klang/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::UserResolution`] if the home directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let home = crate::utils::platform::get_home_dir()?;
        Ok(home.join(TOOL_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert_eq!(config.release.api_url, "https://api.github.com");
        assert_eq!(config.release.asset, "klang.jar");
        assert_eq!(config.release.selection, ReleaseSelection::First);
        assert_eq!(config.network.api_timeout(), Duration::from_secs(10));
        assert_eq!(config.network.download_timeout(), Duration::from_secs(600));
        assert_eq!(config.release.repository(), "KlangLang/Klang");
    }

    #[test]
    fn test_releases_url_trims_trailing_slash() {
        let config = ReleaseConfig {
            api_url: "http://127.0.0.1:8080/".to_string(),
            ..ReleaseConfig::default()
        };
        assert_eq!(config.releases_url(), "http://127.0.0.1:8080/repos/KlangLang/Klang/releases");
    }

    #[tokio::test]
    async fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[release]\nowner = \"fork\"\nselection = \"highest-semver\"\n\n[network]\napi_timeout_secs = 3\n",
        )
        .unwrap();

        let config = GlobalConfig::load_from(&path).await.unwrap();
        assert_eq!(config.release.owner, "fork");
        assert_eq!(config.release.repo, "Klang");
        assert_eq!(config.release.selection, ReleaseSelection::HighestSemver);
        assert_eq!(config.network.api_timeout_secs, 3);
        assert_eq!(config.network.download_timeout_secs, 600);
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config =
            GlobalConfig::load_with_optional(Some(temp.path().join("missing.toml"))).await.unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[release\nowner = ").unwrap();

        let err = GlobalConfig::load_from(&path).await.unwrap_err();
        assert!(matches!(err, LoomError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_unknown_selection_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[release]\nselection = \"newest\"\n").unwrap();

        assert!(GlobalConfig::load_from(&path).await.is_err());
    }
}

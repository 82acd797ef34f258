//! Isolated home directory plus a fake release host.

use super::server::{MockResponse, MockServer};
use crate::config::{GlobalConfig, ReleaseConfig};
use crate::install::InstallPaths;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Listing path the default configuration queries.
pub const RELEASES_PATH: &str = "/repos/KlangLang/Klang/releases";

/// A temporary home directory whose configuration points at a [`MockServer`].
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub server: MockServer,
    pub config_path: PathBuf,
}

impl TestEnvironment {
    /// Creates the home directory and writes a configuration that sends every
    /// request to the mock server.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the configuration cannot be written.
    pub fn new() -> Self {
        super::init_test_logging(None);

        let temp_dir = TempDir::new().expect("create temp home");
        let server = MockServer::start();
        let config_path = temp_dir.path().join("loom.toml");
        std::fs::write(
            &config_path,
            format!("[release]\napi_url = \"{}\"\n\n[network]\napi_timeout_secs = 5\n", server.url("")),
        )
        .expect("write config");

        Self {
            temp_dir,
            server,
            config_path,
        }
    }

    /// The isolated home directory.
    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Installation layout below [`home`](Self::home).
    pub fn paths(&self) -> InstallPaths {
        InstallPaths::from_home(self.home())
    }

    /// Configuration equivalent to the file at `config_path`.
    pub fn config(&self) -> GlobalConfig {
        GlobalConfig {
            release: ReleaseConfig {
                api_url: self.server.url(""),
                ..ReleaseConfig::default()
            },
            ..GlobalConfig::default()
        }
    }

    /// Publishes releases, most recent first, each carrying `klang.jar` whose
    /// content is `jar-<tag>`.
    pub fn publish(&self, tags: &[&str]) {
        let releases: Vec<serde_json::Value> = tags
            .iter()
            .map(|tag| {
                let path = format!("/download/{tag}/klang.jar");
                self.server.mock(&path, MockResponse::bytes(Self::jar_content(tag).into_bytes()));
                serde_json::json!({
                    "tag_name": tag,
                    "prerelease": false,
                    "assets": [{
                        "name": "klang.jar",
                        "browser_download_url": self.server.url(&path),
                    }],
                })
            })
            .collect();
        self.server.mock(RELEASES_PATH, MockResponse::json(serde_json::Value::from(releases).to_string()));
    }

    /// Content of the jar served for `tag`.
    pub fn jar_content(tag: &str) -> String {
        format!("jar-{tag}")
    }

    /// Environment variables isolating a `loom` process in this environment.
    pub fn envs(&self, shell: &str) -> Vec<(&'static str, OsString)> {
        vec![
            ("HOME", self.home().as_os_str().to_owned()),
            ("SHELL", OsString::from(shell)),
            ("LOOM_CONFIG", self.config_path.as_os_str().to_owned()),
            ("LOOM_NO_PROGRESS", OsString::from("1")),
            ("NO_COLOR", OsString::from("1")),
        ]
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

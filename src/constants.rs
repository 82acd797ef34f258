//! Global constants used throughout the loom codebase.
//!
//! This module contains the fixed installation layout, the release source
//! defaults and the network timeouts. Defining them centrally keeps the
//! layout produced by `install` and the layout expected by `update` and
//! `remove` in one place.

use std::time::Duration;

/// Name of the per-user installation directory, relative to the home directory.
pub const TOOL_DIR_NAME: &str = ".klang";

/// Subdirectory of the installation directory holding the launcher.
pub const BIN_DIR_NAME: &str = "bin";

/// Subdirectory of the installation directory holding version bookkeeping.
pub const VERSION_DIR_NAME: &str = "version";

/// Subdirectory of the installation directory holding the active artifact.
pub const ACTIVE_DIR_NAME: &str = "active";

/// File inside the version directory recording the installed release tag.
pub const VERSION_MARKER_NAME: &str = "current";

/// Name of the launcher script placed in the `bin` directory.
pub const LAUNCHER_NAME: &str = "kc";

/// Exact filename of the release asset that gets installed.
pub const ARTIFACT_NAME: &str = "klang.jar";

/// The only component `loom install` knows how to provision.
pub const TOOLCHAIN_COMPONENT: &str = "klang";

/// Line appended to the user's shell startup file.
pub const PATH_EXPORT_LINE: &str = r#"export PATH="$HOME/.klang/bin:$PATH""#;

/// Fragment identifying the installation `bin` directory inside a PATH entry.
pub const PATH_MARKER: &str = ".klang/bin";

/// Name of the installer binary itself, used by `loom remove`.
pub const INSTALLER_BINARY_NAME: &str = "loom";

/// System-wide location the installer binary is usually placed in.
pub const SYSTEM_BIN_DIR: &str = "/usr/local/bin";

/// Default GitHub API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default owner of the repository publishing Klang releases.
pub const DEFAULT_REPO_OWNER: &str = "KlangLang";

/// Default repository publishing Klang releases.
pub const DEFAULT_REPO_NAME: &str = "Klang";

/// Name of the optional configuration file inside the installation directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// User agent sent with every outbound request.
///
/// GitHub rejects API requests that carry no `User-Agent` header.
pub const USER_AGENT: &str = concat!("loom/", env!("CARGO_PKG_VERSION"));

/// Timeout for the release listing request (10 seconds).
pub const RELEASE_API_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the whole artifact download (10 minutes).
///
/// The artifact is a single jar; ten minutes covers slow links while still
/// preventing a hung server from stalling the install forever.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Timeout for establishing any outbound connection (10 seconds).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

//! Platform-specific helpers.
//!
//! loom targets Unix-like systems, but the lookups here still explain what to
//! check on each platform when they fail.

use crate::core::{LoomError, Result};
use std::path::PathBuf;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the current user's home directory.
///
/// On Unix this honors `HOME` first and falls back to the password database,
/// matching [`dirs::home_dir`].
///
/// # Errors
///
/// Returns [`LoomError::UserResolution`] if no home directory can be found.
///
/// # Examples
///
/// ```rust,no_run
/// use loom_cli::utils::platform::get_home_dir;
///
/// # fn example() -> loom_cli::core::Result<()> {
/// let home = get_home_dir()?;
/// println!("Installing below {}", home.join(".klang").display());
/// # Ok(())
/// # }
/// ```
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().filter(|home| !home.as_os_str().is_empty()).ok_or_else(|| {
        let platform_help = if is_windows() {
            "check that the USERPROFILE environment variable is set"
        } else {
            "check that the HOME environment variable is set"
        };
        LoomError::UserResolution {
            reason: platform_help.to_string(),
        }
    })
}

/// Reads the `SHELL` environment variable.
///
/// Returns `None` when the variable is unset, empty or not valid Unicode.
#[must_use]
pub fn shell_from_env() -> Option<String> {
    std::env::var("SHELL").ok().filter(|shell| !shell.trim().is_empty())
}

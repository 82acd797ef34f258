//! Shell detection and startup file lookup.

use crate::core::{LoomError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Shells loom knows the startup file of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
    /// Any other shell; falls back to `~/.profile`.
    Other,
}

impl ShellKind {
    /// Classifies a shell by its name (the last segment of `SHELL`).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "bash" => Self::Bash,
            "zsh" => Self::Zsh,
            "fish" => Self::Fish,
            _ => Self::Other,
        }
    }

    /// Startup file relative to the home directory.
    #[must_use]
    pub const fn config_file(self) -> &'static str {
        match self {
            Self::Bash => ".bashrc",
            Self::Zsh => ".zshrc",
            Self::Fish => ".config/fish/config.fish",
            Self::Other => ".profile",
        }
    }
}

/// The user's shell and the startup file that receives the PATH entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Shell name as found in `SHELL` (e.g. `zsh`).
    pub name: String,
    /// Classification of [`name`](Self::name).
    pub kind: ShellKind,
    /// Absolute path of the startup file.
    pub config_path: PathBuf,
}

impl ShellConfig {
    /// Resolves the startup file from the value of `SHELL`.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::ShellDetection`] if `shell` is `None` or blank.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use loom_cli::install::ShellConfig;
    /// use std::path::Path;
    ///
    /// let shell = ShellConfig::detect(Some("/usr/bin/fish"), Path::new("/home/ada")).unwrap();
    /// assert_eq!(shell.config_path, Path::new("/home/ada/.config/fish/config.fish"));
    /// assert_eq!(shell.display_path(), "~/.config/fish/config.fish");
    /// ```
    pub fn detect(shell: Option<&str>, home: &Path) -> Result<Self> {
        let shell = shell.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
            LoomError::ShellDetection {
                reason: "SHELL variable not defined".to_string(),
            }
        })?;

        let name = shell.trim_end_matches('/').rsplit('/').next().unwrap_or(shell).to_string();
        let kind = ShellKind::from_name(&name);
        let config_path = home.join(kind.config_file());
        tracing::debug!("shell {name} uses {}", config_path.display());

        Ok(Self {
            name,
            kind,
            config_path,
        })
    }

    /// The startup file in `~/` form, for hints shown to the user.
    #[must_use]
    pub fn display_path(&self) -> String {
        format!("~/{}", self.kind.config_file())
    }
}

impl fmt::Display for ShellConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.display_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(shell: Option<&str>) -> Result<ShellConfig> {
        ShellConfig::detect(shell, Path::new("/home/ada"))
    }

    #[test]
    fn test_known_shells() {
        assert_eq!(detect(Some("/bin/bash")).unwrap().config_path, Path::new("/home/ada/.bashrc"));
        assert_eq!(detect(Some("/bin/zsh")).unwrap().config_path, Path::new("/home/ada/.zshrc"));
        assert_eq!(
            detect(Some("/usr/local/bin/fish")).unwrap().config_path,
            Path::new("/home/ada/.config/fish/config.fish")
        );
    }

    #[test]
    fn test_unknown_shell_falls_back_to_profile() {
        let shell = detect(Some("/bin/tcsh")).unwrap();
        assert_eq!(shell.name, "tcsh");
        assert_eq!(shell.kind, ShellKind::Other);
        assert_eq!(shell.config_path, Path::new("/home/ada/.profile"));
    }

    #[test]
    fn test_bare_shell_name() {
        assert_eq!(detect(Some("zsh")).unwrap().kind, ShellKind::Zsh);
    }

    #[test]
    fn test_missing_shell() {
        assert!(matches!(detect(None), Err(LoomError::ShellDetection { .. })));
        assert!(matches!(detect(Some("  ")), Err(LoomError::ShellDetection { .. })));
    }

    #[test]
    fn test_display() {
        let shell = detect(Some("/bin/zsh")).unwrap();
        assert_eq!(shell.to_string(), "zsh (~/.zshrc)");
    }
}

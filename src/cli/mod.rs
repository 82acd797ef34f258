//! Command-line interface for loom
//!
//! Parsing uses clap's derive API: [`Cli`] holds the global flags and a
//! subcommand, and each subcommand is a struct with an `execute` method.
//!
//! # Commands
//!
//! - `install` - Install the Klang toolchain into `~/.klang`
//! - `update` - Replace an existing installation with a newer release
//! - `remove` - Delete the loom binary itself
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - Only warnings and errors
//! - `--config` / `-c` - Configuration file (also `LOOM_CONFIG`)
//! - `--no-progress` - Hide the download progress bar
//!
//! # Examples
//!
//! ```bash
//! loom install
//! loom install klang --tag v0.4.0 --no-modify-path
//! loom update --force
//! loom remove
//! ```

mod install;
mod remove;
mod update;


pub use install::InstallCommand;
pub use remove::RemoveCommand;
pub use update::UpdateCommand;

use crate::config::GlobalConfig;
use crate::utils::progress::{StatusReporter, is_progress_disabled};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Settings derived from the global flags, passed to every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Suppress everything but warnings and errors.
    pub quiet: bool,
    /// Hide progress bars.
    pub no_progress: bool,
    /// Explicit configuration file.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Reporter for user-facing output.
    #[must_use]
    pub const fn status(&self) -> StatusReporter {
        StatusReporter::new(self.quiet)
    }

    /// Whether to draw the download progress bar.
    ///
    /// Never when stdout is not a terminal.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.quiet
            && !self.no_progress
            && !is_progress_disabled()
            && std::io::stdout().is_terminal()
    }

    /// Loads the configuration file named by `--config`, or the default one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LoomError::ConfigError`] for a malformed file.
    pub async fn load_global_config(&self) -> crate::core::Result<GlobalConfig> {
        GlobalConfig::load_with_optional(self.config_path.clone()).await
    }
}

/// loom - installer for the Klang toolchain
#[derive(Parser)]
#[command(
    name = "loom",
    about = "Install and manage the Klang toolchain",
    version,
    author,
    long_about = "loom installs the Klang compiler into ~/.klang, puts the kc launcher on your PATH and keeps it up to date."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, env = "LOOM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the Klang toolchain
    Install(InstallCommand),

    /// Remove the loom binary
    Remove(RemoveCommand),

    /// Update an existing Klang installation
    Update(UpdateCommand),
}

impl Cli {
    /// Runs the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; `main` renders it and picks the exit code.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Derives [`CliConfig`] from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
        }
    }

    /// Runs the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Install(cmd) => cmd.execute(&config).await,
            Commands::Remove(cmd) => cmd.execute(&config).await,
            Commands::Update(cmd) => cmd.execute(&config).await,
        }
    }
}

//! Progress indicators and user-facing status output
//!
//! This module provides the download progress bar and the [`StatusReporter`]
//! used to print installer steps. Both respect `--quiet`/`--no-progress` and
//! the `LOOM_NO_PROGRESS` environment variable so scripted runs stay clean.
//!
//! # Examples
//!
//! ```rust,no_run
//! use loom_cli::utils::progress::{ProgressBar, StatusReporter};
//!
//! let status = StatusReporter::new(false);
//! status.step("Downloading klang.jar");
//!
//! let progress = ProgressBar::new_download(Some(1024), true);
//! progress.set_prefix("klang.jar");
//! progress.inc(1024);
//! progress.finish_and_clear();
//! ```

use colored::Colorize;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

/// Checks if progress bars were disabled through the environment.
///
/// Any value of `LOOM_NO_PROGRESS` disables them.
#[must_use]
pub fn is_progress_disabled() -> bool {
    std::env::var_os("LOOM_NO_PROGRESS").is_some()
}

/// A byte-counting progress bar with consistent styling.
///
/// When progress is disabled the bar is hidden and silently ignores all updates,
/// so callers never need to branch on whether it is shown.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a download bar for `total` bytes, or a spinner-like bar when the
    /// size is unknown.
    #[must_use]
    pub fn new_download(total: Option<u64>, enabled: bool) -> Self {
        if !enabled || is_progress_disabled() {
            return Self::hidden();
        }
        let bar = match total {
            Some(len) => {
                let bar = IndicatifBar::new(len);
                bar.set_style(ProgressStyle::download());
                bar
            }
            None => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(ProgressStyle::download_unknown());
                bar
            }
        };
        Self {
            inner: bar,
        }
    }

    /// Creates a progress bar that draws nothing.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the prefix shown before the bar.
    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    /// Advances the bar by `delta` bytes.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Current position in bytes.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Finishes and removes the bar from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Leaves the bar on screen in its current state.
    pub fn abandon(&self) {
        self.inner.abandon();
    }
}

/// Predefined progress bar styles.
pub struct ProgressStyle;

impl ProgressStyle {
    /// Style for downloads with a known size.
    ///
    /// Example output:
    /// ```text
    /// klang.jar [━━━━━━━━━━━━━━━━━━━━╸━━━━━━━━━━━━━━━━━━━] 2.1 MiB/4.2 MiB (00:05)
    /// ```
    #[must_use]
    pub fn download() -> IndicatifStyle {
        IndicatifStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| IndicatifStyle::default_bar())
            .progress_chars("━╸━")
    }

    /// Style for downloads whose size the server did not advertise.
    #[must_use]
    pub fn download_unknown() -> IndicatifStyle {
        IndicatifStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.cyan} {bytes} ({bytes_per_sec})")
            .unwrap_or_else(|_| IndicatifStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
    }
}

/// Prints installer steps, warnings and the final banner.
///
/// Steps and the banner go to stdout and are suppressed by `quiet`. Warnings go
/// to stderr and are always shown, since they describe something the user has
/// to fix by hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusReporter {
    quiet: bool,
}

impl StatusReporter {
    /// Creates a reporter; `quiet` suppresses everything but warnings.
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self {
            quiet,
        }
    }

    /// Whether stdout output is suppressed.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Announces a step of the current operation.
    pub fn step(&self, message: impl AsRef<str>) {
        tracing::info!("{}", message.as_ref());
        if !self.quiet {
            println!("{} {}", "==>".cyan().bold(), message.as_ref());
        }
    }

    /// Prints a plain informational line.
    pub fn info(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: impl AsRef<str>) {
        tracing::debug!("warning: {}", message.as_ref());
        eprintln!("{}: {}", "Warning".yellow().bold(), message.as_ref());
    }

    /// Prints a success line.
    pub fn success(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_tracks_position() {
        let bar = ProgressBar::new_download(Some(100), false);
        bar.inc(40);
        bar.inc(2);
        assert_eq!(bar.position(), 42);
        bar.finish_and_clear();
    }

    #[test]
    fn test_unknown_size_bar() {
        let bar = ProgressBar::new_download(None, false);
        bar.set_prefix("klang.jar");
        bar.inc(10);
        assert_eq!(bar.position(), 10);
        bar.abandon();
    }

    #[test]
    fn test_styles_build() {
        let _ = ProgressStyle::download();
        let _ = ProgressStyle::download_unknown();
    }

    #[test]
    fn test_status_reporter_quiet() {
        let status = StatusReporter::new(true);
        assert!(status.is_quiet());
        status.step("hidden");
        status.success("hidden");
        assert!(!StatusReporter::default().is_quiet());
    }
}

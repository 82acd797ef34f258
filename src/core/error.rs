//! Error handling for loom
//!
//! This module provides the error type shared by every installer component and the
//! user-friendly rendering used by the command-line front end. The error system is
//! designed around two core principles:
//! 1. **Strongly-typed errors** so each component can be tested for the exact failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`LoomError`] - Enumerated error kinds for all failure cases of the installer
//! - [`ErrorContext`] - Wrapper that adds details, a suggestion and the exit code
//!
//! Components return [`Result<T>`](crate::core::Result) and never terminate the process.
//! Command handlers work in [`anyhow::Result`]; `main` hands the final error to
//! [`user_friendly_error`], which finds the [`LoomError`] in the chain, renders it and
//! decides the exit status.
//!
//! # Examples
//!
//! ```rust,no_run
//! use loom_cli::core::{LoomError, user_friendly_error};
//!
//! let error = LoomError::ShellDetection {
//!     reason: "SHELL variable not defined".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! assert_eq!(ctx.exit_code, 2);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for loom operations
///
/// # Error Categories
///
/// ## Environment
/// - [`UserResolution`] - The current user's home directory is unknown
/// - [`ShellDetection`] - `SHELL` is unset, so no startup file can be chosen
/// - [`ConfigError`] - The configuration file cannot be read or parsed
///
/// ## File System
/// - [`PermissionDenied`] - Creating, writing or chmod-ing a path failed
/// - [`NotInstalled`] - `update` was run without a prior installation
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
///
/// ## Release Resolution
/// - [`NetworkError`] - Transport failure or unexpected HTTP status
/// - [`ParseError`] - The release listing is not the expected JSON
/// - [`NoReleases`] - The repository has no releases at all
/// - [`ReleaseNotFound`] - An explicitly requested tag does not exist
/// - [`AssetNotFound`] - The selected release lacks the artifact
///
/// ## Download
/// - [`DownloadStatus`] - The artifact host answered with a non-success status
/// - [`IncompleteDownload`] - The body ended before the advertised size
///
/// [`UserResolution`]: LoomError::UserResolution
/// [`ShellDetection`]: LoomError::ShellDetection
/// [`ConfigError`]: LoomError::ConfigError
/// [`PermissionDenied`]: LoomError::PermissionDenied
/// [`NotInstalled`]: LoomError::NotInstalled
/// [`IoError`]: LoomError::IoError
/// [`NetworkError`]: LoomError::NetworkError
/// [`ParseError`]: LoomError::ParseError
/// [`NoReleases`]: LoomError::NoReleases
/// [`ReleaseNotFound`]: LoomError::ReleaseNotFound
/// [`AssetNotFound`]: LoomError::AssetNotFound
/// [`DownloadStatus`]: LoomError::DownloadStatus
/// [`IncompleteDownload`]: LoomError::IncompleteDownload
#[derive(Error, Debug)]
pub enum LoomError {
    /// The current user's home directory could not be determined
    ///
    /// Every path loom touches lives below the home directory, so the run
    /// cannot continue without it.
    #[error("Could not determine the home directory of the current user: {reason}")]
    UserResolution {
        /// Why the lookup failed
        reason: String,
    },

    /// The active shell could not be determined
    #[error("Could not determine shell config file: {reason}")]
    ShellDetection {
        /// Why detection failed
        reason: String,
    },

    /// Configuration file could not be loaded
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigError {
        /// Path of the configuration file
        path: String,
        /// Read or parse failure
        reason: String,
    },

    /// Permission denied while creating, writing or chmod-ing a path
    ///
    /// # Fields
    /// - `operation`: What loom tried to do (e.g., "create directory")
    /// - `path`: The offending path
    /// - `reason`: The underlying OS error
    #[error("Permission error while trying to {operation} '{path}': {reason}")]
    PermissionDenied {
        /// The operation that failed
        operation: String,
        /// Path where the failure occurred
        path: String,
        /// Underlying OS error
        reason: String,
    },

    /// No installation exists where one is required
    #[error("Klang is not installed: {path} does not exist")]
    NotInstalled {
        /// The directory that was expected to exist
        path: String,
    },

    /// Network error
    #[error("Network error while trying to {operation}: {reason}")]
    NetworkError {
        /// The network operation that failed
        operation: String,
        /// Reason for the network failure
        reason: String,
    },

    /// The release listing could not be decoded
    #[error("Failed to parse {what}: {reason}")]
    ParseError {
        /// What was being parsed
        what: String,
        /// Decoder error
        reason: String,
    },

    /// The repository has no releases
    #[error("No releases found for {repository}")]
    NoReleases {
        /// `owner/repo` that was queried
        repository: String,
    },

    /// An explicitly requested release tag does not exist
    #[error("Release '{tag}' not found")]
    ReleaseNotFound {
        /// The requested tag
        tag: String,
    },

    /// The selected release does not carry the artifact
    #[error("{asset} not found in release {tag}")]
    AssetNotFound {
        /// The asset name that was looked for
        asset: String,
        /// Tag of the release that was searched
        tag: String,
    },

    /// The artifact host answered with a non-success status
    #[error("Download failed: HTTP status {status} for {url}")]
    DownloadStatus {
        /// The requested URL
        url: String,
        /// HTTP status line (e.g., "404 Not Found")
        status: String,
    },

    /// The download ended before the expected number of bytes arrived
    #[error("Incomplete download of {path}: expected {expected} bytes, received {actual}")]
    IncompleteDownload {
        /// Destination that was being written
        path: String,
        /// Advertised size
        expected: u64,
        /// Bytes actually received
        actual: u64,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl LoomError {
    /// Process exit code for this error kind.
    ///
    /// | Kind | Code |
    /// |------|------|
    /// | user, shell, config | 2 |
    /// | permission, io | 3 |
    /// | network, download status, incomplete download | 4 |
    /// | parse, no releases, release/asset not found | 5 |
    /// | not installed | 6 |
    /// | other | 1 |
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::UserResolution { .. } | Self::ShellDetection { .. } | Self::ConfigError { .. } => 2,
            Self::PermissionDenied { .. } | Self::IoError(_) => 3,
            Self::NetworkError { .. } | Self::DownloadStatus { .. } | Self::IncompleteDownload { .. } => {
                4
            }
            Self::ParseError { .. }
            | Self::NoReleases { .. }
            | Self::ReleaseNotFound { .. }
            | Self::AssetNotFound { .. } => 5,
            Self::NotInstalled { .. } => 6,
            Self::Other { .. } => 1,
        }
    }

    /// Build a [`LoomError::PermissionDenied`] from an I/O failure on `path`.
    pub fn permission(
        operation: impl Into<String>,
        path: &std::path::Path,
        source: &std::io::Error,
    ) -> Self {
        Self::PermissionDenied {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: source.to_string(),
        }
    }

    /// Build a [`LoomError::NetworkError`] from any displayable transport error.
    pub fn network(operation: impl Into<String>, source: impl fmt::Display) -> Self {
        Self::NetworkError {
            operation: operation.into(),
            reason: source.to_string(),
        }
    }
}

impl Clone for LoomError {
    fn clone(&self) -> Self {
        match self {
            Self::UserResolution {
                reason,
            } => Self::UserResolution {
                reason: reason.clone(),
            },
            Self::ShellDetection {
                reason,
            } => Self::ShellDetection {
                reason: reason.clone(),
            },
            Self::ConfigError {
                path,
                reason,
            } => Self::ConfigError {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
                reason,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::NotInstalled {
                path,
            } => Self::NotInstalled {
                path: path.clone(),
            },
            Self::NetworkError {
                operation,
                reason,
            } => Self::NetworkError {
                operation: operation.clone(),
                reason: reason.clone(),
            },
            Self::ParseError {
                what,
                reason,
            } => Self::ParseError {
                what: what.clone(),
                reason: reason.clone(),
            },
            Self::NoReleases {
                repository,
            } => Self::NoReleases {
                repository: repository.clone(),
            },
            Self::ReleaseNotFound {
                tag,
            } => Self::ReleaseNotFound {
                tag: tag.clone(),
            },
            Self::AssetNotFound {
                asset,
                tag,
            } => Self::AssetNotFound {
                asset: asset.clone(),
                tag: tag.clone(),
            },
            Self::DownloadStatus {
                url,
                status,
            } => Self::DownloadStatus {
                url: url.clone(),
                status: status.clone(),
            },
            Self::IncompleteDownload {
                path,
                expected,
                actual,
            } => Self::IncompleteDownload {
                path: path.clone(),
                expected: *expected,
                actual: *actual,
            },
            // io::Error is not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` pairs a [`LoomError`] with optional details and a suggestion, and
/// carries the exit code the process should terminate with.
///
/// # Examples
///
/// ```rust,no_run
/// use loom_cli::core::{ErrorContext, LoomError};
///
/// let context = ErrorContext::new(LoomError::NoReleases {
///     repository: "KlangLang/Klang".to_string(),
/// })
/// .with_suggestion("Check https://github.com/KlangLang/Klang/releases")
/// .with_details("The repository has not published any release yet");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying loom error
    pub error: LoomError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
    /// Exit code the process terminates with
    pub exit_code: i32,
}

impl ErrorContext {
    /// Create a new error context from a [`LoomError`]
    ///
    /// The exit code is taken from [`LoomError::exit_code`].
    #[must_use]
    pub const fn new(error: LoomError) -> Self {
        let exit_code = error.exit_code();
        Self {
            error,
            suggestion: None,
            details: None,
            exit_code,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Walks the error chain looking for a [`LoomError`] (commands wrap component errors
/// with `anyhow` context). When one is found the context is tailored to it; context
/// messages added above it are kept as details. Errors without a [`LoomError`] in
/// their chain are rendered with their full cause chain and exit code 1.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(loom_error) = cause.downcast_ref::<LoomError>() {
            let ctx = create_error_context(loom_error.clone());
            let outer = error.to_string();
            if ctx.details.is_none() && outer != loom_error.to_string() {
                return ctx.with_details(outer);
            }
            return ctx;
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return create_error_context(LoomError::IoError(std::io::Error::new(
                io_error.kind(),
                io_error.to_string(),
            )));
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(LoomError::Other {
        message,
    })
}

/// Create appropriate [`ErrorContext`] with suggestions for specific loom errors
fn create_error_context(error: LoomError) -> ErrorContext {
    match &error {
        LoomError::UserResolution { .. } => ErrorContext::new(error)
            .with_suggestion("Make sure the HOME environment variable points to your home directory")
            .with_details("loom installs Klang below ~/.klang and needs the home directory to locate it"),

        LoomError::ShellDetection { .. } => ErrorContext::new(error)
            .with_suggestion("Set SHELL (e.g. 'export SHELL=/bin/bash') or rerun with --no-modify-path")
            .with_details("The SHELL variable selects which startup file receives the PATH entry"),

        LoomError::ConfigError { path, .. } => {
            let suggestion = format!("Fix or remove {path}; every setting has a default");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        LoomError::PermissionDenied { operation, path, .. } => {
            let details = format!("Cannot {operation} due to insufficient permissions on {path}");
            ErrorContext::new(error)
                .with_suggestion("Check ownership and permissions of the path with 'ls -la'")
                .with_details(details)
        }

        LoomError::NotInstalled { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'loom install' first"),

        LoomError::NetworkError { .. } => ErrorContext::new(error)
            .with_suggestion("Check your internet connection and try again")
            .with_details("GitHub may also be rate limiting unauthenticated requests (60 per hour)"),

        LoomError::ParseError { .. } => ErrorContext::new(error)
            .with_details("The release API answered with data loom does not understand"),

        LoomError::NoReleases { repository } => {
            let suggestion = format!("Check https://github.com/{repository}/releases");
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        LoomError::ReleaseNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Omit --tag to install the latest release"),

        LoomError::AssetNotFound { tag, .. } => {
            let details = format!("Release {tag} does not publish the Klang artifact yet");
            ErrorContext::new(error)
                .with_suggestion("Try an earlier release with --tag")
                .with_details(details)
        }

        LoomError::DownloadStatus { .. } | LoomError::IncompleteDownload { .. } => {
            ErrorContext::new(error)
                .with_suggestion("Run 'loom install' again; an existing installation was left untouched")
        }

        LoomError::IoError(_) | LoomError::Other { .. } => ErrorContext::new(error),
    }
}

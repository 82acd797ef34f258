//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Directory creation, atomic writes and permission bits
//! - [`platform`] - Home directory and shell lookups
//! - [`progress`] - Download progress bar and status output

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, safe_write};
pub use platform::{get_home_dir, is_windows};
pub use progress::{ProgressBar, ProgressStyle, StatusReporter};

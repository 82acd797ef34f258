//! File system utilities used by the installer
//!
//! All functions return [`crate::core::Result`] so that failures surface as
//! [`crate::core::LoomError::PermissionDenied`] naming the offending path.
//!
//! # Examples
//!
//! ```rust,no_run
//! use loom_cli::utils::fs::{EXECUTABLE_MODE, ensure_dir, safe_write, set_mode};
//! use std::path::Path;
//!
//! # fn example() -> loom_cli::core::Result<()> {
//! ensure_dir(Path::new("/home/user/.klang/bin"))?;
//! safe_write(Path::new("/home/user/.klang/bin/kc"), "#!/bin/sh\n")?;
//! set_mode(Path::new("/home/user/.klang/bin/kc"), EXECUTABLE_MODE)?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;
pub mod permissions;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{ensure_dir, ensure_parent_dir};
pub use permissions::{EXECUTABLE_MODE, READABLE_MODE, set_mode};

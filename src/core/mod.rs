//! Core types and error handling for loom.
//!
//! Every installer component returns [`Result`], whose error type is the single
//! [`LoomError`] enum. The command layer adds `anyhow` context on top and `main`
//! renders the outcome through [`user_friendly_error`].

pub mod error;

pub use error::{ErrorContext, LoomError, user_friendly_error};

/// Result alias used by the installer components.
pub type Result<T> = std::result::Result<T, LoomError>;

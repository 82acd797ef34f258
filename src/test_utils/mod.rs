//! Test utilities for loom
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! - [`MockServer`] - in-process HTTP server for the release API and downloads
//! - [`TestEnvironment`] - temporary home directory wired to a [`MockServer`]
//! - [`init_test_logging`] - one-time tracing setup
//!
//! # Example
//!
//! ```rust,no_run
//! use loom_cli::test_utils::TestEnvironment;
//!
//! let env = TestEnvironment::new();
//! env.publish(&["v0.2.0", "v0.1.0"]);
//! assert!(!env.paths().artifact().exists());
//! ```

pub mod environment;
pub mod server;

pub use environment::{RELEASES_PATH, TestEnvironment};
pub use server::{MockResponse, MockServer};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Runs at most once per process. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=loom_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

//! Integration test suite for loom
//!
//! These tests run the real `loom` binary against a temporary home directory and
//! an in-process HTTP server standing in for the GitHub API.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **install**: full installs, idempotency, shell handling, banner
//! - **update**: updating an existing installation
//! - **remove**: deleting the loom binary
//! - **errors**: error rendering and exit codes

use assert_cmd::Command;
use loom_cli::test_utils::TestEnvironment;

mod errors;
mod install;
mod remove;
mod update;

/// A `loom` command isolated in `env`, with `SHELL` set to `shell`.
pub fn loom(env: &TestEnvironment, shell: &str) -> Command {
    let mut cmd = Command::cargo_bin("loom").unwrap();
    cmd.env_clear();
    cmd.env("PATH", std::env::var_os("PATH").unwrap_or_default());
    cmd.envs(env.envs(shell));
    cmd.current_dir(env.home());
    cmd
}

/// Like [`loom`] but without `SHELL` in the environment.
pub fn loom_without_shell(env: &TestEnvironment) -> Command {
    let mut cmd = loom(env, "");
    cmd.env_remove("SHELL");
    cmd
}

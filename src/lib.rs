//! loom - installer for the Klang toolchain
//!
//! loom provisions a per-user Klang installation:
//!
//! ```text
//! ~/.klang/
//! ├── bin/kc              shell launcher: exec java -jar ~/.klang/active/klang.jar
//! ├── version/current     tag of the installed release
//! └── active/klang.jar    compiler artifact from the latest GitHub release
//! ```
//!
//! and appends `export PATH="$HOME/.klang/bin:$PATH"` to the user's shell
//! startup file exactly once.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface (`install`, `update`, `remove`)
//! - [`install`] - Installation stages and the orchestrating [`install::Installer`]
//! - [`release`] - Release lookup and artifact download
//! - [`config`] - Optional `~/.klang/config.toml`
//! - [`core`] - Error type and user-facing error rendering
//! - [`utils`] - File system, platform and progress helpers
//! - [`constants`] - Installation layout and defaults
//!
//! # Error Handling
//!
//! Library components return [`core::Result`]. Nothing below `main` exits the
//! process; the binary maps the final [`core::LoomError`] to an exit code.
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Install the latest release and patch the shell startup file
//! loom install
//!
//! # Install a specific release without touching shell configuration
//! loom install --tag v0.4.0 --no-modify-path
//!
//! # Move to the newest release
//! loom update
//!
//! # Delete the loom binary
//! loom remove
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod install;
pub mod release;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

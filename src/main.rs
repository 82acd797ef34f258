//! loom command-line entry point.

use clap::Parser;
use loom_cli::cli::{Cli, CliConfig};
use loom_cli::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = cli.build_config();
    init_logging(&config);

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute_with_config(config).await {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(error_ctx.exit_code);
    }
}

/// Logs go to stderr. `RUST_LOG` overrides the level chosen by the flags.
fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

//! `loom install`

use super::CliConfig;
use crate::constants::{PATH_EXPORT_LINE, TOOLCHAIN_COMPONENT};
use crate::install::{InstallEnvironment, InstallOptions, InstallReport, Installer, PathUpdate};
use crate::release::ReleaseQuery;
use crate::utils::progress::StatusReporter;
use anyhow::{Context, Result};
use clap::Args;

const BANNER_RULE: &str = "=============================================";

/// Install the Klang toolchain into ~/.klang
#[derive(Args, Debug, Default)]
pub struct InstallCommand {
    /// Components to install (only "klang" is supported)
    #[arg(value_name = "COMPONENT")]
    components: Vec<String>,

    /// Install a specific release instead of the latest one
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Do not add ~/.klang/bin to the shell startup file
    #[arg(long)]
    no_modify_path: bool,
}

impl InstallCommand {
    /// Runs the installation.
    ///
    /// # Errors
    ///
    /// Returns any non-recoverable installer error.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let status = config.status();
        self.warn_unsupported(&status);

        let env = InstallEnvironment::from_process()?;
        let global = config.load_global_config().await?;
        let options = InstallOptions {
            query: ReleaseQuery::from_option(self.tag),
            modify_path: !self.no_modify_path,
            show_progress: config.show_progress(),
        };

        let mut installer = Installer::new(env, global, options, status);
        let report = installer
            .install()
            .await
            .with_context(|| format!("Installation failed while {}", failed_stage(&installer)))?;

        print_banner(&status, &report);
        Ok(())
    }

    /// Components other than klang are accepted but ignored.
    fn warn_unsupported(&self, status: &StatusReporter) {
        let mut seen: Vec<&str> = Vec::new();
        for name in &self.components {
            if name != TOOLCHAIN_COMPONENT && !seen.contains(&name.as_str()) {
                status.warn(format!("loom does not support {name} yet. Installing klang only."));
                seen.push(name);
            }
        }
    }
}

fn failed_stage(installer: &Installer) -> String {
    installer.failed_at().map_or_else(|| "installing".to_string(), |stage| stage.to_string())
}

fn print_banner(status: &StatusReporter, report: &InstallReport) {
    status.success(format!("Installed Klang {} ({} bytes)", report.tag, report.bytes));
    status.info(BANNER_RULE);
    status.info("Klang installed successfully!");
    match (&report.shell, &report.path_update) {
        (Some(shell), PathUpdate::Appended | PathUpdate::AlreadyPresent) => {
            status.info("Restart your terminal or run:");
            status.info(format!("  source {}", shell.display_path()));
        }
        _ => {
            status.info("Add the launcher to your PATH:");
            status.info(format!("  {PATH_EXPORT_LINE}"));
        }
    }
    status.info("Then verify installation with:");
    status.info("  kc --version");
    status.info(BANNER_RULE);
}

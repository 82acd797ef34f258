//! `loom update`

use super::CliConfig;
use crate::install::{InstallEnvironment, InstallOptions, Installer, UpdateOutcome};
use crate::release::ReleaseQuery;
use anyhow::Result;
use clap::Args;

/// Update an existing Klang installation
#[derive(Args, Debug, Default)]
pub struct UpdateCommand {
    /// Install a specific release instead of the latest one
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Download even if the release is already installed
    #[arg(short, long)]
    force: bool,
}

impl UpdateCommand {
    /// Runs the update.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LoomError::NotInstalled`] without a prior
    /// installation, or any release or download error.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let status = config.status();
        let env = InstallEnvironment::from_process()?;
        let global = config.load_global_config().await?;
        let options = InstallOptions {
            query: ReleaseQuery::from_option(self.tag),
            modify_path: false,
            show_progress: config.show_progress(),
        };

        match Installer::new(env, global, options, status).update(self.force).await? {
            UpdateOutcome::UpToDate {
                tag,
            } => status.success(format!("Klang {tag} is already up to date")),
            UpdateOutcome::Updated {
                previous: Some(previous),
                tag,
                ..
            } if previous == tag => status.success(format!("Reinstalled Klang {tag}")),
            UpdateOutcome::Updated {
                previous: Some(previous),
                tag,
                ..
            } => status.success(format!("Updated Klang from {previous} to {tag}")),
            UpdateOutcome::Updated {
                previous: None,
                tag,
                ..
            } => status.success(format!("Updated Klang to {tag}")),
        }
        Ok(())
    }
}

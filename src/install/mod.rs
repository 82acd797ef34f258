//! Installing and updating the Klang toolchain
//!
//! [`Installer`] drives a fixed sequence of stages. Each stage is awaited
//! before the next one starts and none is retried:
//!
//! ```text
//! ResolvingPaths → ProvisioningDirs → WritingLauncher → PatchingShellConfig
//!     → ResolvingRelease → Downloading → Done
//! ```
//!
//! Any failure moves the installer to [`InstallStage::Failed`], remembers the
//! stage that failed and returns the error to the caller. Patching the shell
//! startup file is the one exception: its failure is reported as a warning and
//! the installation proceeds, since the user can add the PATH line by hand.
//!
//! # Components
//!
//! - [`paths`] - the `~/.klang` layout
//! - [`provision`] - directory creation
//! - [`launcher`] - the `kc` launcher script
//! - [`shell`] - mapping `SHELL` to a startup file
//! - [`shell_config`] - appending the PATH entry

pub mod launcher;
pub mod paths;
pub mod provision;
pub mod shell;
pub mod shell_config;


pub use launcher::{LauncherArtifact, LauncherWriter};
pub use paths::InstallPaths;
pub use provision::DirectoryProvisioner;
pub use shell::{ShellConfig, ShellKind};
pub use shell_config::{PatchOutcome, ShellConfigPatcher, has_path_entry};

use crate::config::GlobalConfig;
use crate::constants::PATH_EXPORT_LINE;
use crate::core::{LoomError, Result};
use crate::release::{ArtifactDownloader, ReleaseQuery, ReleaseResolver, ResolvedArtifact};
use crate::utils::fs::safe_write;
use crate::utils::progress::StatusReporter;
use std::fmt;
use std::path::PathBuf;

/// Stages of an installation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStage {
    ResolvingPaths,
    ProvisioningDirs,
    WritingLauncher,
    PatchingShellConfig,
    ResolvingRelease,
    Downloading,
    Done,
    Failed,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResolvingPaths => "resolving paths",
            Self::ProvisioningDirs => "creating directories",
            Self::WritingLauncher => "writing launcher",
            Self::PatchingShellConfig => "updating shell configuration",
            Self::ResolvingRelease => "resolving release",
            Self::Downloading => "downloading",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The parts of the process environment the installer depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallEnvironment {
    /// Home directory of the current user.
    pub home: PathBuf,
    /// Value of `SHELL`, if set.
    pub shell: Option<String>,
}

impl InstallEnvironment {
    pub fn new(home: impl Into<PathBuf>, shell: Option<String>) -> Self {
        Self {
            home: home.into(),
            shell,
        }
    }

    /// Reads the home directory and `SHELL` of the running process.
    ///
    /// # Errors
    ///
    /// Returns [`LoomError::UserResolution`] if the home directory is unknown.
    pub fn from_process() -> Result<Self> {
        Ok(Self {
            home: crate::utils::platform::get_home_dir()?,
            shell: crate::utils::platform::shell_from_env(),
        })
    }
}

/// Options of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Release to install.
    pub query: ReleaseQuery,
    /// Whether to add the launcher directory to the shell startup file.
    pub modify_path: bool,
    /// Whether to draw the download progress bar.
    pub show_progress: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            query: ReleaseQuery::Latest,
            modify_path: true,
            show_progress: true,
        }
    }
}

/// What happened to the shell startup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathUpdate {
    /// `--no-modify-path` was given.
    Skipped,
    /// The file already had an entry.
    AlreadyPresent,
    /// The PATH line was appended.
    Appended,
    /// Patching failed; the user was warned.
    Failed(String),
}

/// Outcome of a successful installation.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub paths: InstallPaths,
    /// `None` when the shell configuration was left alone.
    pub shell: Option<ShellConfig>,
    pub path_update: PathUpdate,
    pub tag: String,
    pub artifact: PathBuf,
    pub bytes: u64,
}

/// Outcome of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The recorded tag already matches the resolved release.
    UpToDate {
        tag: String,
    },
    /// A new artifact was downloaded.
    Updated {
        previous: Option<String>,
        tag: String,
        bytes: u64,
    },
}

/// Drives installation and update runs.
///
/// # Examples
///
/// ```rust,no_run
/// use loom_cli::config::GlobalConfig;
/// use loom_cli::install::{InstallEnvironment, InstallOptions, Installer};
/// use loom_cli::utils::progress::StatusReporter;
///
/// # async fn example() -> loom_cli::core::Result<()> {
/// let env = InstallEnvironment::from_process()?;
/// let mut installer = Installer::new(
///     env,
///     GlobalConfig::load().await?,
///     InstallOptions::default(),
///     StatusReporter::new(false),
/// );
/// let report = installer.install().await?;
/// println!("installed {}", report.tag);
/// # Ok(())
/// # }
/// ```
pub struct Installer {
    env: InstallEnvironment,
    config: GlobalConfig,
    options: InstallOptions,
    status: StatusReporter,
    stage: InstallStage,
    failed_at: Option<InstallStage>,
}

impl Installer {
    #[must_use]
    pub const fn new(
        env: InstallEnvironment,
        config: GlobalConfig,
        options: InstallOptions,
        status: StatusReporter,
    ) -> Self {
        Self {
            env,
            config,
            options,
            status,
            stage: InstallStage::ResolvingPaths,
            failed_at: None,
        }
    }

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> InstallStage {
        self.stage
    }

    /// The stage that failed, once the installer is in [`InstallStage::Failed`].
    #[must_use]
    pub const fn failed_at(&self) -> Option<InstallStage> {
        self.failed_at
    }

    fn enter(&mut self, stage: InstallStage) {
        tracing::debug!("stage: {stage}");
        self.stage = stage;
    }

    fn finish<T>(&mut self, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.enter(InstallStage::Done),
            Err(e) => {
                tracing::debug!("failed while {}: {e}", self.stage);
                self.failed_at = Some(self.stage);
                self.stage = InstallStage::Failed;
            }
        }
        result
    }

    /// Runs a full installation.
    ///
    /// Running it again is safe: directories are reused, the launcher and the
    /// artifact are replaced, and the PATH line is never added twice.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage other than
    /// [`InstallStage::PatchingShellConfig`].
    pub async fn install(&mut self) -> Result<InstallReport> {
        let result = self.run_install().await;
        self.finish(result)
    }

    async fn run_install(&mut self) -> Result<InstallReport> {
        self.enter(InstallStage::ResolvingPaths);
        let paths = InstallPaths::from_home(&self.env.home);
        let shell = if self.options.modify_path {
            let shell = ShellConfig::detect(self.env.shell.as_deref(), &self.env.home)?;
            self.status.step(format!("Shell determined: {shell}"));
            Some(shell)
        } else {
            None
        };

        self.enter(InstallStage::ProvisioningDirs);
        self.status.step(format!("Creating directories in {}", paths.base.display()));
        DirectoryProvisioner::new(&paths).provision()?;

        self.enter(InstallStage::WritingLauncher);
        LauncherWriter::write(&LauncherArtifact::for_artifact(&paths.launcher(), &paths.artifact()))?;

        self.enter(InstallStage::PatchingShellConfig);
        let path_update = match &shell {
            Some(shell) => self.patch_shell_config(shell).await,
            None => PathUpdate::Skipped,
        };

        let (artifact, bytes) = self.fetch_artifact(&paths).await?;

        Ok(InstallReport {
            artifact: paths.artifact(),
            paths,
            shell,
            path_update,
            tag: artifact.tag,
            bytes,
        })
    }

    async fn patch_shell_config(&self, shell: &ShellConfig) -> PathUpdate {
        match ShellConfigPatcher::new(&shell.config_path).patch().await {
            Ok(PatchOutcome::AlreadyPresent) => {
                self.status.step(format!("PATH already configured in {}", shell.display_path()));
                PathUpdate::AlreadyPresent
            }
            Ok(PatchOutcome::Appended) => {
                self.status.step(format!("Added ~/.klang/bin to PATH in {}", shell.display_path()));
                PathUpdate::Appended
            }
            Err(e) => {
                self.status.warn(format!(
                    "could not update {}: {e}\nAdd this line to it manually:\n  {PATH_EXPORT_LINE}",
                    shell.display_path()
                ));
                PathUpdate::Failed(e.to_string())
            }
        }
    }

    /// Resolves and downloads the artifact, then records its tag.
    async fn fetch_artifact(&mut self, paths: &InstallPaths) -> Result<(ResolvedArtifact, u64)> {
        self.enter(InstallStage::ResolvingRelease);
        let artifact = self.resolve().await?;
        self.download(paths, &artifact).await.map(|bytes| (artifact, bytes))
    }

    async fn resolve(&self) -> Result<ResolvedArtifact> {
        let artifact = ReleaseResolver::new(&self.config.release, &self.config.network)
            .resolve(&self.options.query)
            .await?;
        let label = match self.options.query {
            ReleaseQuery::Latest => "Found latest version",
            ReleaseQuery::Tag(_) => "Found version",
        };
        if artifact.prerelease {
            self.status.step(format!("{label}: {} (pre-release)", artifact.tag));
        } else {
            self.status.step(format!("{label}: {}", artifact.tag));
        }
        Ok(artifact)
    }

    async fn download(&mut self, paths: &InstallPaths, artifact: &ResolvedArtifact) -> Result<u64> {
        self.enter(InstallStage::Downloading);
        self.status.step(format!("Downloading {} from {}", artifact.name, artifact.url));
        let bytes = ArtifactDownloader::new(&self.config.network, self.options.show_progress)
            .download(artifact, &paths.artifact())
            .await?;
        self.status.success("Download complete!");

        if let Err(e) = safe_write(&paths.version_marker(), &format!("{}\n", artifact.tag)) {
            self.status.warn(format!("could not record the installed version: {e}"));
        }
        Ok(bytes)
    }

    /// Replaces an existing installation with the requested release.
    ///
    /// Leaves the shell configuration alone. Unless `force` is set, nothing is
    /// downloaded when the recorded tag already matches the resolved release
    /// and both the artifact and the launcher are still in place.
    ///
    /// # Errors
    ///
    /// - [`LoomError::NotInstalled`] if `~/.klang/active` does not exist
    /// - any error of the release, launcher or download stages
    pub async fn update(&mut self, force: bool) -> Result<UpdateOutcome> {
        let result = self.run_update(force).await;
        self.finish(result)
    }

    async fn run_update(&mut self, force: bool) -> Result<UpdateOutcome> {
        self.enter(InstallStage::ResolvingPaths);
        let paths = InstallPaths::from_home(&self.env.home);
        if !paths.active.is_dir() {
            return Err(LoomError::NotInstalled {
                path: paths.active.display().to_string(),
            });
        }
        let previous = paths.installed_tag().await;

        self.enter(InstallStage::ResolvingRelease);
        let artifact = self.resolve().await?;
        let up_to_date = previous.as_deref() == Some(artifact.tag.as_str())
            && paths.artifact().is_file()
            && paths.launcher().is_file();
        if !force && up_to_date {
            tracing::info!("{} is already installed", artifact.tag);
            return Ok(UpdateOutcome::UpToDate {
                tag: artifact.tag,
            });
        }

        self.enter(InstallStage::ProvisioningDirs);
        DirectoryProvisioner::new(&paths).provision()?;

        self.enter(InstallStage::WritingLauncher);
        LauncherWriter::write(&LauncherArtifact::for_artifact(&paths.launcher(), &paths.artifact()))?;

        let bytes = self.download(&paths, &artifact).await?;
        Ok(UpdateOutcome::Updated {
            previous,
            tag: artifact.tag,
            bytes,
        })
    }
}

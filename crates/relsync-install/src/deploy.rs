use std::path::{Path, PathBuf};
use std::sync::Arc;

use relsync_archive::{ExtractOptions, Progress, extract};
use relsync_fs::{ClearOutcome, Staging, clear_dir, copy_dir_all};
use tracing::{error, info, info_span};

use crate::error::DeployError;
use crate::report::TargetResult;

/// User configuration subtree preserved across updates.
pub const CONFIG_DIR: &str = "config";

/// Archive prefix holding bundled runtime dependencies.
pub const DEPS_PREFIX: &str = "deps/";

/// Applies artifacts to a single target directory.
#[derive(Clone)]
pub struct Deployer {
    staging: Staging,
    on_progress: Option<Arc<dyn Fn(&Progress) + Send + Sync>>,
}

impl Deployer {
    pub fn new(staging: Staging) -> Self {
        Self {
            staging,
            on_progress: None,
        }
    }

    pub fn on_progress(mut self, callback: Arc<dyn Fn(&Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Deploy to `target`, logging and absorbing any failure into the result.
    pub fn deploy(&self, target: &Path, minimal: &Path, full: Option<&Path>) -> TargetResult {
        let span = info_span!("deploy", target = %target.display());
        let _enter = span.enter();

        match self.try_deploy(target, minimal, full) {
            Ok(()) => {
                info!("target updated");
                TargetResult::success(target)
            }
            Err(e) => {
                error!(error = %e, "target update failed");
                TargetResult::failure(target, e.to_string())
            }
        }
    }

    /// Run the five deployment steps, stopping at the first failure.
    pub fn try_deploy(
        &self,
        target: &Path,
        minimal: &Path,
        full: Option<&Path>,
    ) -> Result<(), DeployError> {
        let backup = self.backup(target)?;

        match clear_dir(target).map_err(DeployError::Wipe)? {
            ClearOutcome::Created => info!("created target directory"),
            ClearOutcome::Cleared(entries) => info!(entries, "cleared target directory"),
        }

        let report = extract(minimal, target, &self.extract_options(None))
            .map_err(DeployError::Install)?;
        info!(
            entries = report.entry_count,
            bytes = report.total_bytes,
            "installed minimal artifact"
        );

        if let Some(backup) = backup {
            copy_dir_all(&backup, target.join(CONFIG_DIR)).map_err(DeployError::Restore)?;
            info!("restored configuration");
        }

        if let Some(full) = full {
            let report = extract(full, target, &self.extract_options(Some(DEPS_PREFIX)))
                .map_err(DeployError::Dependencies)?;
            info!(
                entries = report.entry_count,
                bytes = report.total_bytes,
                "extracted dependencies"
            );
        }

        Ok(())
    }

    fn backup(&self, target: &Path) -> Result<Option<PathBuf>, DeployError> {
        let config = target.join(CONFIG_DIR);
        if !config.exists() {
            info!("no configuration to back up");
            return Ok(None);
        }

        let backup = self
            .staging
            .backup_dir_for(target)
            .map_err(DeployError::Backup)?
            .join(CONFIG_DIR);
        copy_dir_all(&config, &backup).map_err(DeployError::Backup)?;
        info!(backup = %backup.display(), "backed up configuration");
        Ok(Some(backup))
    }

    fn extract_options(&self, prefix: Option<&str>) -> ExtractOptions {
        ExtractOptions {
            prefix: prefix.map(str::to_string),
            on_progress: self.on_progress.clone(),
        }
    }
}

//! Orchestration of a full update run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use relsync_archive::{Progress, inspect};
use relsync_fetch::{Fetcher, HttpClient};
use relsync_fs::Staging;
use relsync_release::{AssetNaming, ReleaseChannel, ReleasePlan, ReleaseSource, RepoId, Role};
use tracing::{error, info, warn};

use crate::acquire::{self, Artifact};
use crate::deploy::{DEPS_PREFIX, Deployer};
use crate::error::PipelineError;
use crate::hooks::{PipelineHook, run_hooks};
use crate::report::RunReport;

/// What to resolve and whether the full artifact may be downloaded.
#[derive(Debug, Clone)]
pub struct ReleaseSettings {
    pub repo: RepoId,
    pub channel: ReleaseChannel,
    pub naming: AssetNaming,
    pub full_download_enabled: bool,
}

/// Applies one set of artifacts to every target, then cleans up.
pub struct Rollout {
    staging: Staging,
    targets: Vec<PathBuf>,
    hooks: Vec<Box<dyn PipelineHook>>,
    on_progress: Option<Arc<dyn Fn(&Progress) + Send + Sync>>,
}

impl Rollout {
    pub fn new(staging: Staging, targets: Vec<PathBuf>) -> Self {
        Self {
            staging,
            targets,
            hooks: Vec::new(),
            on_progress: None,
        }
    }

    pub fn hook<H: PipelineHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Extraction progress for every target.
    pub fn on_progress(mut self, callback: Arc<dyn Fn(&Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn staging(&self) -> &Staging {
        &self.staging
    }

    pub fn targets(&self) -> &[PathBuf] {
        &self.targets
    }

    /// Deploy archives already on disk, skipping resolution and download.
    pub fn deploy_local(
        &self,
        minimal: &Path,
        full: Option<&Path>,
    ) -> Result<RunReport, PipelineError> {
        let minimal = acquire::local(Role::Minimal, minimal)?;
        let full = if needs_dependencies(&minimal)? {
            match full {
                Some(path) => Some(acquire::local(Role::Full, path)?),
                None => {
                    warn!("no full artifact given, dependency extraction skipped");
                    None
                }
            }
        } else {
            None
        };

        Ok(self.execute(None, &minimal, full.as_ref()))
    }

    /// Deploy to every target in order, then remove the staging area and run
    /// the end-of-run hooks. Never fails: per-target problems are recorded in
    /// the report and cleanup problems are logged.
    pub(crate) fn execute(
        &self,
        version: Option<String>,
        minimal: &Artifact,
        full: Option<&Artifact>,
    ) -> RunReport {
        let mut deployer = Deployer::new(self.staging.clone());
        if let Some(callback) = &self.on_progress {
            deployer = deployer.on_progress(Arc::clone(callback));
        }
        for artifact in std::iter::once(minimal).chain(full) {
            info!(
                role = %artifact.role,
                path = %artifact.path.display(),
                verdict = ?artifact.verdict,
                cached = artifact.from_cache,
                "artifact ready"
            );
        }
        let full_path = full.map(|a| a.path.as_path());

        let mut results = Vec::with_capacity(self.targets.len());
        for (index, target) in self.targets.iter().enumerate() {
            info!(
                target = %target.display(),
                "updating target {}/{}",
                index + 1,
                self.targets.len()
            );
            let result = deployer.deploy(target, &minimal.path, full_path);
            run_hooks(&self.hooks, "target_finished", |h| h.on_target_finished(&result));
            results.push(result);
        }

        let report = RunReport {
            version,
            results,
            dependencies_extracted: full.is_some(),
        };

        match self.staging.remove() {
            Ok(true) => info!(path = %self.staging.root().display(), "removed staging area"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not remove staging area"),
        }

        run_hooks(&self.hooks, "finish", |h| h.on_finish(&report));

        if report.success() {
            info!(targets = report.results.len(), "all targets updated");
        } else {
            for failed in report.failed() {
                error!(target = %failed.target.display(), "target was not updated");
            }
        }
        report
    }

    fn notify_resolved(&self, plan: &ReleasePlan) {
        run_hooks(&self.hooks, "resolved", |h| h.on_resolved(plan));
    }
}

/// The end-to-end update: resolve, acquire, roll out.
pub struct Pipeline<S, C> {
    source: S,
    fetcher: Fetcher<C>,
    settings: ReleaseSettings,
    rollout: Rollout,
}

impl<S: ReleaseSource, C: HttpClient> Pipeline<S, C> {
    pub fn new(source: S, fetcher: Fetcher<C>, settings: ReleaseSettings, rollout: Rollout) -> Self {
        Self {
            source,
            fetcher,
            settings,
            rollout,
        }
    }

    pub fn resolve(&self) -> Result<ReleasePlan, PipelineError> {
        let settings = &self.settings;
        info!(repo = %settings.repo, channel = %settings.channel, "resolving release");
        let plan = relsync_release::resolve(
            &self.source,
            &settings.repo,
            settings.channel,
            settings.naming.clone(),
        )?;
        info!(version = plan.version(), "release resolved");
        Ok(plan)
    }

    /// Run the whole update.
    ///
    /// An error means no target was touched: resolution, download or
    /// verification failed. Otherwise the report says which targets succeeded.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        let plan = self.resolve()?;
        self.rollout.notify_resolved(&plan);

        let staging = self.rollout.staging();
        staging.prepare()?;

        let minimal = acquire::acquire(&self.fetcher, staging, &plan, &plan.minimal)?;
        let full = self.acquire_full(&plan, &minimal)?;

        Ok(self
            .rollout
            .execute(Some(plan.version().to_string()), &minimal, full.as_ref()))
    }

    fn acquire_full(
        &self,
        plan: &ReleasePlan,
        minimal: &Artifact,
    ) -> Result<Option<Artifact>, PipelineError> {
        if !needs_dependencies(minimal)? {
            return Ok(None);
        }
        if !self.settings.full_download_enabled {
            info!("full artifact download disabled, dependency extraction skipped");
            return Ok(None);
        }
        let Some(selected) = &plan.full else {
            warn!("no full artifact available, dependency extraction skipped");
            return Ok(None);
        };

        acquire::acquire(&self.fetcher, self.rollout.staging(), plan, selected).map(Some)
    }
}

/// Whether the minimal artifact lacks the dependency bundle.
fn needs_dependencies(minimal: &Artifact) -> Result<bool, PipelineError> {
    let listing = inspect(&minimal.path).map_err(|e| PipelineError::Integrity {
        role: Role::Minimal,
        path: minimal.path.clone(),
        source: e.into(),
    })?;

    let bundled = listing.has_prefix(DEPS_PREFIX);
    if bundled {
        info!(
            bytes = listing.size_under(DEPS_PREFIX),
            "minimal artifact already bundles dependencies"
        );
    } else {
        info!("minimal artifact has no dependency bundle");
    }
    Ok(!bundled)
}

//! Lifecycle hooks for a pipeline run.
//!
//! Hooks observe the run without changing its outcome: a failing hook is
//! logged as a warning and the run continues.

use relsync_release::ReleasePlan;
use tracing::warn;

use crate::error::HookError;
use crate::report::{RunReport, TargetResult};

pub trait PipelineHook: Send + Sync {
    /// Name of this hook for error reporting.
    fn name(&self) -> &'static str;

    /// Called once the release has been resolved, before anything is fetched.
    fn on_resolved(&self, _plan: &ReleasePlan) -> Result<(), HookError> {
        Ok(())
    }

    /// Called after each target, successful or not.
    fn on_target_finished(&self, _result: &TargetResult) -> Result<(), HookError> {
        Ok(())
    }

    /// Called after the staging area has been cleaned up.
    fn on_finish(&self, _report: &RunReport) -> Result<(), HookError> {
        Ok(())
    }
}

pub(crate) fn run_hooks(
    hooks: &[Box<dyn PipelineHook>],
    stage: &str,
    call: impl Fn(&dyn PipelineHook) -> Result<(), HookError>,
) {
    for hook in hooks {
        if let Err(e) = call(hook.as_ref()) {
            warn!(hook = hook.name(), stage, error = %e, "hook failed");
        }
    }
}

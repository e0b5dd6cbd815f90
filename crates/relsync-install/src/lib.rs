//! Deployment and orchestration of a release update.
//!
//! - [`Deployer`] applies verified artifacts to one target directory:
//!   backup → wipe → install → restore → dependencies.
//! - [`Rollout`] runs the deployer over every target, then cleans the staging
//!   area and notifies [`PipelineHook`]s.
//! - [`Pipeline`] resolves the release, acquires artifacts (cache → fetch →
//!   verify) and hands them to a [`Rollout`].

mod acquire;
mod deploy;
mod error;
mod hooks;
mod pipeline;
mod report;

pub use acquire::{Artifact, verify};
pub use deploy::{CONFIG_DIR, DEPS_PREFIX, Deployer};
pub use error::{DeployError, HookError, PipelineError};
pub use hooks::PipelineHook;
pub use pipeline::{Pipeline, ReleaseSettings, Rollout};
pub use report::{RunReport, TargetResult};

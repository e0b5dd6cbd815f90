use std::path::PathBuf;

use relsync_release::Role;
use thiserror::Error;

/// Why one target failed. Only that target is affected.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("backing up configuration failed: {0}")]
    Backup(#[source] relsync_fs::Error),

    #[error("clearing target directory failed: {0}")]
    Wipe(#[source] relsync_fs::Error),

    #[error("installing minimal artifact failed: {0}")]
    Install(#[source] relsync_archive::Error),

    #[error("restoring configuration failed: {0}")]
    Restore(#[source] relsync_fs::Error),

    #[error("extracting dependencies failed: {0}")]
    Dependencies(#[source] relsync_archive::Error),
}

/// Conditions that end the run before or instead of touching targets.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("release resolution failed: {0}")]
    Resolution(#[from] relsync_release::Error),

    #[error("preparing staging area failed: {0}")]
    Staging(#[from] relsync_fs::Error),

    #[error("downloading {role} artifact failed: {source}")]
    Fetch {
        role: Role,
        #[source]
        source: relsync_fetch::Error,
    },

    #[error("{role} artifact '{path}' failed verification: {source}")]
    Integrity {
        role: Role,
        path: PathBuf,
        #[source]
        source: relsync_verify::VerificationError,
    },
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("hook '{name}' failed: {source}")]
    HookFailed {
        name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HookError {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        HookError::HookFailed {
            name: name.into(),
            source: source.into(),
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use relsync_fetch::{Fetcher, HttpClient};
use relsync_fs::Staging;
use relsync_release::{ReleaseDescriptor, ReleasePlan, Role, SelectedAsset};
use relsync_verify::{Verdict, verify_artifact};
use tracing::{error, info, warn};

use crate::error::PipelineError;

/// A verified artifact ready to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub role: Role,
    pub path: PathBuf,
    pub verdict: Verdict,
    /// Whether the file was reused from a previous run.
    pub from_cache: bool,
}

/// Check `path` as the release asset `asset_name`.
///
/// The archive must be structurally valid. When the release publishes a
/// SHA-256 for the asset, the file must also match it.
pub fn verify(path: &Path, release: &ReleaseDescriptor, asset_name: &str) -> bool {
    let published = release.published_digest(asset_name);
    match verify_artifact(path, published.as_ref()) {
        Ok(_) => true,
        Err(e) => {
            error!(path = %path.display(), asset = asset_name, error = %e, "verification failed");
            false
        }
    }
}

/// Obtain the artifact for `selected`: reuse a verified cached copy, otherwise
/// download and verify a fresh one.
pub(crate) fn acquire<C: HttpClient>(
    fetcher: &Fetcher<C>,
    staging: &Staging,
    plan: &ReleasePlan,
    selected: &SelectedAsset,
) -> Result<Artifact, PipelineError> {
    let role = selected.role;
    let path = staging.artifact_path(&plan.cache_file_name(selected));
    let published = plan.release.published_digest(&selected.asset.name);

    if path.is_file() {
        info!(%role, path = %path.display(), "found cached artifact");
        if verify(&path, &plan.release, &selected.asset.name) {
            let verdict = match published {
                Some(digest) => Verdict::Checksum(digest),
                None => Verdict::StructureOnly,
            };
            return Ok(Artifact {
                role,
                path,
                verdict,
                from_cache: true,
            });
        }
        warn!(%role, "cached artifact is unusable, downloading again");
        discard(&path);
    }

    fetcher
        .fetch(&selected.asset.download_url, &path)
        .map_err(|source| PipelineError::Fetch { role, source })?;

    match verify_artifact(&path, published.as_ref()) {
        Ok(verdict) => Ok(Artifact {
            role,
            path,
            verdict,
            from_cache: false,
        }),
        Err(source) => {
            discard(&path);
            Err(PipelineError::Integrity { role, path, source })
        }
    }
}

/// Check a local archive supplied by the user. Nothing is published for it,
/// so only its structure is checked.
pub(crate) fn local(role: Role, path: &Path) -> Result<Artifact, PipelineError> {
    let verdict = verify_artifact(path, None).map_err(|source| PipelineError::Integrity {
        role,
        path: path.to_path_buf(),
        source,
    })?;
    info!(%role, path = %path.display(), "using local artifact");
    Ok(Artifact {
        role,
        path: path.to_path_buf(),
        verdict,
        from_cache: false,
    })
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!(path = %path.display(), error = %e, "could not remove rejected artifact");
    }
}

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Keep at most `keep` files in `dir` whose names satisfy `matches`,
/// deleting the oldest ones by modification time.
///
/// A missing directory is a no-op. Failure to delete an individual file is
/// logged and does not stop the sweep; the returned list holds only the
/// files that were actually removed.
pub fn prune_oldest(
    dir: impl AsRef<Path>,
    keep: usize,
    matches: impl Fn(&str) -> bool,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut candidates: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::Read {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !matches(name) {
            continue;
        }
        let metadata = entry.metadata().map_err(|e| Error::Read {
            path: entry.path(),
            source: e,
        })?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        candidates.push((modified, entry.path()));
    }

    if candidates.len() <= keep {
        return Ok(Vec::new());
    }

    // oldest first; the path breaks ties so the sweep is deterministic
    candidates.sort();
    let excess = candidates.len() - keep;

    let mut removed = Vec::with_capacity(excess);
    for (_, path) in candidates.into_iter().take(excess) {
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed rotated file");
                removed.push(path);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove rotated file");
            }
        }
    }
    Ok(removed)
}

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// What [`clear_dir`] found at the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The directory did not exist and was created.
    Created,
    /// The directory existed; this many direct entries were removed.
    Cleared(usize),
}

/// Empty `dir` without removing the directory itself.
///
/// Every direct entry (files, symlinks and whole subtrees) is deleted. A
/// missing directory is created instead. The first deletion failure aborts
/// the wipe and leaves the remaining entries in place.
pub fn clear_dir(dir: impl AsRef<Path>) -> Result<ClearOutcome> {
    let dir = dir.as_ref();

    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        return Ok(ClearOutcome::Created);
    }

    if !dir.is_dir() {
        return Err(Error::NotADirectory(dir.to_path_buf()));
    }

    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| Error::Read {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::Read {
            path: path.clone(),
            source: e,
        })?;

        let result = if file_type.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|e| Error::Remove { path, source: e })?;
        removed += 1;
    }

    Ok(ClearOutcome::Cleared(removed))
}

/// Remove a directory tree, treating an already-missing directory as success.
///
/// Returns `true` when something was removed.
pub fn remove_dir_if_exists(dir: impl AsRef<Path>) -> Result<bool> {
    let dir = dir.as_ref();
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Remove {
            path: dir.to_path_buf(),
            source: e,
        }),
    }
}

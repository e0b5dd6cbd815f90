use crate::primitives::remove_dir_if_exists;
use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Number of hex characters kept from the path digest.
pub const BACKUP_KEY_LEN: usize = 16;

const DOWNLOADS_DIR: &str = "downloads";
const BACKUPS_DIR: &str = "backups";

/// Stable, collision-resistant key for a target directory.
///
/// Derived from the absolute form of `target`, so relative and absolute
/// spellings of the same directory share a key.
pub fn backup_key(target: impl AsRef<Path>) -> Result<String> {
    let target = target.as_ref();
    let absolute = std::path::absolute(target).map_err(|e| Error::Resolve {
        path: target.to_path_buf(),
        source: e,
    })?;
    let digest = Sha256::digest(absolute.to_string_lossy().as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(BACKUP_KEY_LEN);
    Ok(key)
}

/// Scratch area of one run.
///
/// ```text
/// <root>/downloads/<artifact>.zip
/// <root>/backups/<key>/config/...
/// ```
///
/// Unlike a transactional workspace the staging area is *not* removed on drop:
/// a run that aborts before deployment keeps its downloads so the next run can
/// reuse them. [`Staging::remove`] is called explicitly at the end of a run.
#[derive(Debug, Clone)]
pub struct Staging {
    root: PathBuf,
}

impl Staging {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.root.join(BACKUPS_DIR)
    }

    /// Create the downloads directory (and the root) if needed.
    pub fn prepare(&self) -> Result<()> {
        let downloads = self.downloads_dir();
        std::fs::create_dir_all(&downloads).map_err(|e| Error::CreateDir {
            path: downloads,
            source: e,
        })
    }

    /// Location of a downloaded artifact inside the staging area.
    pub fn artifact_path(&self, file_name: &str) -> PathBuf {
        self.downloads_dir().join(file_name)
    }

    /// Backup directory reserved for `target`.
    pub fn backup_dir_for(&self, target: impl AsRef<Path>) -> Result<PathBuf> {
        Ok(self.backups_dir().join(backup_key(target)?))
    }

    /// Delete the whole staging tree. Returns `false` if it did not exist.
    pub fn remove(&self) -> Result<bool> {
        remove_dir_if_exists(&self.root)
    }
}

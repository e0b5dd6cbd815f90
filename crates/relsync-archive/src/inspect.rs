use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::normalize_entry_name;

/// One entry of an archive's central directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub size: u64,
    pub is_dir: bool,
}

/// The file listing of an archive that opened successfully.
#[derive(Clone, Debug)]
pub struct ArchiveListing {
    pub path: PathBuf,
    pub entries: Vec<ListedEntry>,
}

impl ArchiveListing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry lives under `prefix`, judged by internal paths only.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.entries.iter().any(|e| e.name.starts_with(prefix))
    }

    /// Total uncompressed size of the entries under `prefix`.
    pub fn size_under(&self, prefix: &str) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.name.starts_with(prefix))
            .map(|e| e.size)
            .sum()
    }
}

/// Open `path` as a zip archive and read its central directory.
///
/// Any failure to parse the archive structure is reported as
/// [`Error::Corrupted`]; entry contents are not decompressed.
pub fn inspect(path: impl AsRef<Path>) -> Result<ArchiveListing> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::Open {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut archive =
        zip::ZipArchive::new(BufReader::new(file)).map_err(|e| Error::corrupted(path, e))?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let file = archive.by_index(i).map_err(|e| Error::corrupted(path, e))?;
        entries.push(ListedEntry {
            name: normalize_entry_name(file.name()),
            size: file.size(),
            is_dir: file.is_dir(),
        });
    }

    tracing::debug!(archive = %path.display(), entries = entries.len(), "read archive listing");

    Ok(ArchiveListing {
        path: path.to_path_buf(),
        entries,
    })
}

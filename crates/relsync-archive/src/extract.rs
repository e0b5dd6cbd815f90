use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::normalize_entry_name;
use crate::options::{ExtractOptions, Progress};
use crate::report::{ArchiveReport, ExtractedEntry};
use crate::sanitize::sanitize_path;

/// Extract `archive_path` into `destination`.
///
/// With [`ExtractOptions::prefix`] set only the matching subtree is written
/// (at its full relative path), and an archive without any matching entry is
/// an error. Existing files at the destination are overwritten.
pub fn extract(
    archive_path: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let archive_path = archive_path.as_ref();
    let destination = destination.as_ref();

    let file = File::open(archive_path).map_err(|e| Error::Open {
        path: archive_path.to_path_buf(),
        source: e,
    })?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::corrupted(archive_path, e))?;

    // First pass over the central directory: what gets extracted and how big it is.
    let mut selected = Vec::new();
    let mut total_bytes = 0u64;
    for i in 0..archive.len() {
        let file = archive
            .by_index(i)
            .map_err(|e| Error::corrupted(archive_path, e))?;
        if options.selects(&normalize_entry_name(file.name())) {
            total_bytes += file.size();
            selected.push(i);
        }
    }

    if let Some(prefix) = &options.prefix
        && selected.is_empty()
    {
        return Err(Error::PrefixNotFound {
            archive: archive_path.to_path_buf(),
            prefix: prefix.clone(),
        });
    }

    std::fs::create_dir_all(destination).map_err(|e| Error::DirectoryCreationFailed {
        path: destination.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        archive = %archive_path.display(),
        destination = %destination.display(),
        entries = selected.len(),
        total_bytes,
        "extracting archive"
    );

    let mut entries = Vec::with_capacity(selected.len());
    let mut bytes_processed = 0u64;

    for i in selected {
        let mut file = archive
            .by_index(i)
            .map_err(|e| Error::corrupted(archive_path, e))?;

        let raw_path = file
            .enclosed_name()
            .ok_or_else(|| Error::InvalidPath(file.name().to_string()))?;
        let sanitized = sanitize_path(&raw_path, destination)?;
        let target = sanitized.resolved;
        let size = file.size();
        let is_directory = file.is_dir();

        if is_directory {
            std::fs::create_dir_all(&target).map_err(|e| Error::DirectoryCreationFailed {
                path: target.clone(),
                source: e,
            })?;
        } else {
            if let Some(parent) = target.parent()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreationFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }

            let mut out_file = File::create(&target).map_err(|e| Error::ExtractionFailed {
                path: target.clone(),
                source: e,
            })?;
            std::io::copy(&mut file, &mut out_file).map_err(|e| Error::ExtractionFailed {
                path: target.clone(),
                source: e,
            })?;

            #[cfg(unix)]
            apply_unix_mode(&target, file.unix_mode())?;
        }

        bytes_processed += size;
        options.report(&Progress {
            bytes_processed,
            total_bytes,
            current_file: Some(raw_path.clone()),
            finished: false,
        });

        entries.push(ExtractedEntry {
            original_path: raw_path,
            target_path: target,
            size,
            is_directory,
        });
    }

    options.report(&Progress {
        bytes_processed,
        total_bytes,
        current_file: None,
        finished: true,
    });

    tracing::info!(
        archive = %archive_path.display(),
        destination = %destination.display(),
        "extraction complete"
    );

    Ok(ArchiveReport {
        entry_count: entries.len(),
        total_bytes,
        entries,
    })
}

#[cfg(unix)]
fn apply_unix_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    // Archives built on Windows carry no permission bits; keep the umask default.
    if let Some(mode) = mode
        && mode & 0o777 != 0
    {
        let perms = std::fs::Permissions::from_mode((mode & 0o777) | 0o200);
        std::fs::set_permissions(path, perms).map_err(|e| Error::ExtractionFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

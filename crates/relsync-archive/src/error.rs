use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("archive '{path}' is corrupted: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    #[error("zip-slip attack detected: entry '{entry}' resolves to '{resolved}'")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("entry '{0}' has an unsafe path")]
    InvalidPath(String),

    #[error("archive '{archive}' has no entries under '{prefix}'")]
    PrefixNotFound { archive: PathBuf, prefix: String },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },
}

impl Error {
    pub(crate) fn corrupted(path: &std::path::Path, err: zip::result::ZipError) -> Self {
        Self::Corrupted {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

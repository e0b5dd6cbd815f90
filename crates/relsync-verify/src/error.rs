use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("checksum mismatch: expected {}, got {}", hex::encode(expected), hex::encode(actual))]
    Mismatch {
        expected: Vec<u8>,
        actual:   Vec<u8>,
    },

    #[error("invalid SHA-256 digest: {0}")]
    InvalidDigest(String),

    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("not a valid archive: {0}")]
    Structure(#[from] relsync_archive::Error),
}

pub type Result<T> = std::result::Result<T, VerificationError>;

use std::path::Path;

use crate::digest::{Sha256Digest, hash_file};
use crate::{Result, VerificationError};

/// How an artifact passed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Structure is valid and the published digest matched.
    Checksum(Sha256Digest),
    /// Structure is valid; nothing was published to compare against.
    StructureOnly,
}

/// Verify a downloaded archive against an optional published digest.
pub fn verify_artifact(path: impl AsRef<Path>, published: Option<&Sha256Digest>) -> Result<Verdict> {
    let path = path.as_ref();

    let listing = relsync_archive::inspect(path)?;
    tracing::debug!(path = %path.display(), entries = listing.len(), "archive structure is valid");

    let Some(expected) = published else {
        tracing::info!(path = %path.display(), "no published SHA-256, checked archive structure only");
        return Ok(Verdict::StructureOnly);
    };

    let actual = hash_file(path)?;
    if actual != *expected {
        return Err(VerificationError::Mismatch {
            expected: expected.as_bytes().to_vec(),
            actual:   actual.as_bytes().to_vec(),
        });
    }

    tracing::info!(path = %path.display(), sha256 = %actual, "SHA-256 verified");
    Ok(Verdict::Checksum(actual))
}

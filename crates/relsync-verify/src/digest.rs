use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::{Result, Sha256Hasher, VerificationError, VerifiedReader};

const PREFIX: &str = "sha256:";

/// A SHA-256 digest, compared as raw bytes so hex casing never matters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; 32]);

impl Sha256Digest {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Accepts bare hex or the `sha256:<hex>` form used by release APIs.
impl FromStr for Sha256Digest {
    type Err = VerificationError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex_part = match trimmed.get(..PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(PREFIX) => &trimmed[PREFIX.len()..],
            _ => trimmed,
        };

        let bytes = hex::decode(hex_part).map_err(|_| VerificationError::InvalidDigest(s.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| VerificationError::InvalidDigest(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Digest({self})")
    }
}

/// Hash a whole file, streaming it through [`VerifiedReader`].
pub fn hash_file(path: impl AsRef<Path>) -> Result<Sha256Digest> {
    let path = path.as_ref();
    let read_err = |e: io::Error| VerificationError::Read {
        path: path.to_path_buf(),
        source: e,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut reader = VerifiedReader::new(BufReader::new(file), Sha256Hasher::new());
    io::copy(&mut reader, &mut io::sink()).map_err(read_err)?;

    let bytes: [u8; 32] = reader
        .into_digest()
        .try_into()
        .map_err(|_| VerificationError::InvalidDigest("hasher returned a short digest".into()))?;
    Ok(Sha256Digest(bytes))
}

//! Integrity verification for downloaded artifacts.
//!
//! Verification has two layers:
//!
//! 1. **Structure** - the file must open as an archive and expose its listing.
//!    A structurally invalid file fails regardless of any checksum.
//! 2. **Checksum** - when a SHA-256 digest is published, the whole file is
//!    hashed and compared byte-for-byte. Without a published digest the
//!    structural check alone is accepted.
//!
//! # Example
//!
//! ```
//! use relsync_verify::{Sha256Digest, Sha256Hasher, VerifiedReader};
//!
//! let expected: Sha256Digest =
//!     "sha256:B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE9".parse().unwrap();
//!
//! let mut reader = VerifiedReader::new(&b"hello world"[..], Sha256Hasher::new());
//! std::io::copy(&mut reader, &mut std::io::sink()).unwrap();
//! reader.finish(expected.as_bytes()).unwrap();
//! ```

pub use self::artifact::{Verdict, verify_artifact};
pub use self::digest::{Sha256Digest, hash_file};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod artifact;
mod digest;
mod error;
mod hasher;
mod reader;

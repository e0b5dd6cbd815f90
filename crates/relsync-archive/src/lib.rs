//! Zip inspection and extraction with path sanitization.
//!
//! # Architecture
//!
//! - `inspect.rs` - Central-directory listing, structural validity, prefix probing
//! - `extract.rs` - Streaming extraction (whole archive or one subtree)
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `options.rs` / `report.rs` - Shared types

pub use error::{Error, Result};
pub use extract::extract;
pub use inspect::{ArchiveListing, ListedEntry, inspect};
pub use options::{ExtractOptions, Progress};
pub use report::{ArchiveReport, ExtractedEntry};
pub use sanitize::{SanitizedPath, sanitize_path};

mod error;
mod extract;
mod inspect;
mod options;
mod report;
mod sanitize;

/// Archive entry names always use `/`; some producers emit `\` on Windows.
pub(crate) fn normalize_entry_name(name: &str) -> String {
    name.replace('\\', "/")
}

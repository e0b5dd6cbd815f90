//! Filesystem primitives used by the relsync deployment pipeline.
//!
//! - [`copy_dir_all`] merges one tree into another, overwriting files that
//!   already exist at the destination and never deleting anything.
//! - [`clear_dir`] empties a directory in place, creating it when missing.
//! - [`Staging`] owns the scratch layout shared by a run: downloaded artifacts
//!   and per-target configuration backups.
//! - [`prune_oldest`] keeps a bounded number of rotated files.

mod error;
mod primitives;
mod workflow;

pub use error::{Error, Result};
pub use primitives::{ClearOutcome, clear_dir, copy_dir_all, prune_oldest, remove_dir_if_exists};
pub use workflow::{BACKUP_KEY_LEN, Staging, backup_key};

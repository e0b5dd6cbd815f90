//! Blocking HTTP downloading with chunked streaming writes and bounded retry.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and progress types
//! - [`core`] - Pure retry policy
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! Downloads are written to a `.part` sibling and renamed into place only after
//! the body has been fully received, so an interrupted transfer never leaves a
//! file that looks complete. Checksums are not handled here; callers verify the
//! finished file.

mod core;
mod data;
mod effects;
mod error;

pub use core::RetryPolicy;
pub use data::{FetchOptions, FetchPhase, Progress};
pub use effects::{Fetcher, HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use effects::{ClientSetting, ReqwestClient};

pub use error::{Error, Result};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("relsync/", env!("CARGO_PKG_VERSION"));

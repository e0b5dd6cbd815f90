//! Error types for relsync-fetch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("reading response body from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("writing '{path}' failed: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("destination '{0}' has no file name")]
    InvalidDestination(PathBuf),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("download failed after {count} attempts: {last}")]
    MaxAttemptsExceeded { count: u32, last: Box<Error> },
}

pub type Result<T> = std::result::Result<T, Error>;

use std::io;

use thiserror::Error;

use crate::keywords::Role;

#[derive(Debug, Error)]
pub enum Error {
    #[error("release request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("reading release metadata from {url} failed: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("release metadata from {url} is malformed: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no release published for {0}")]
    NoRelease(String),

    #[error("invalid repository '{0}', expected 'owner/name'")]
    InvalidRepo(String),

    #[error("no {role} asset matches '{pattern}'")]
    MissingAsset { role: Role, pattern: String },

    #[error("invalid asset pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

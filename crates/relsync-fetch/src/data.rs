//! Data layer: immutable types for download configuration and progress tracking.

mod options;
mod progress;

pub use options::{FetchOptions, FetchPhase};
pub use progress::Progress;

//! Core layer: pure transformations.

mod retry;

pub use retry::RetryPolicy;

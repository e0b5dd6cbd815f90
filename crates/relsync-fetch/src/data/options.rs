use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::core::RetryPolicy;
use crate::data::Progress;

/// Phases a download passes through, reported with every [`Progress`] event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Request sent, waiting for response headers.
    Connecting,
    /// Receiving the body.
    Downloading,
    /// Moving the finished `.part` file into place.
    Committing,
    /// The destination file is complete.
    Completed,
}

/// Configuration for a [`Fetcher`](crate::Fetcher).
#[derive(Clone)]
pub struct FetchOptions {
    pub retry: RetryPolicy,
    /// Size of each read from the response body, in bytes.
    pub chunk_size: usize,
    pub headers: Vec<(String, String)>,
    pub on_progress: Option<Arc<dyn Fn(&Progress) + Send + Sync>>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            chunk_size: 8192,
            headers: Vec::new(),
            on_progress: None,
        }
    }
}

impl fmt::Debug for FetchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchOptions")
            .field("retry", &self.retry)
            .field("chunk_size", &self.chunk_size)
            .field("headers", &self.headers)
            .field("on_progress", &self.on_progress.as_ref().map(|_| ".."))
            .finish()
    }
}

impl FetchOptions {
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry = RetryPolicy::new(attempts, self.retry.interval);
        self
    }

    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry.interval = interval;
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn on_progress(mut self, callback: Arc<dyn Fn(&Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub(crate) fn report(&self, progress: Progress) {
        if let Some(callback) = &self.on_progress {
            callback(&progress);
        }
    }
}

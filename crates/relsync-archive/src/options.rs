use std::path::PathBuf;
use std::sync::Arc;

/// Extraction settings.
#[derive(Clone, Default)]
pub struct ExtractOptions {
    /// Only extract entries whose name starts with this prefix (e.g. `deps/`).
    /// Entries keep their full relative path under the destination.
    pub prefix: Option<String>,
    pub on_progress: Option<Arc<dyn Fn(&Progress) + Send + Sync>>,
}

impl std::fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("prefix", &self.prefix)
            .field("on_progress", &self.on_progress.as_ref().map(|_| "{ ... }"))
            .finish()
    }
}

impl ExtractOptions {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn on_progress(mut self, callback: Arc<dyn Fn(&Progress) + Send + Sync>) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub(crate) fn selects(&self, entry_name: &str) -> bool {
        match &self.prefix {
            Some(prefix) => entry_name.starts_with(prefix.as_str()),
            None => true,
        }
    }

    pub(crate) fn report(&self, progress: &Progress) {
        if let Some(callback) = &self.on_progress {
            callback(progress);
        }
    }
}

/// Cumulative uncompressed bytes written so far.
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    pub bytes_processed: u64,
    pub total_bytes: u64,
    pub current_file: Option<PathBuf>,
    pub finished: bool,
}

impl Progress {
    pub fn percentage(&self) -> f32 {
        if self.total_bytes == 0 {
            100.0
        } else {
            (self.bytes_processed as f32 / self.total_bytes as f32) * 100.0
        }
    }
}

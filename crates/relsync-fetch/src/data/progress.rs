use crate::data::FetchPhase;

/// Snapshot of a download, passed to progress callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub phase: FetchPhase,

    /// Bytes written to the staging file during the current attempt.
    pub bytes_downloaded: u64,

    /// Total expected bytes, if the server sent a Content-Length.
    pub total_bytes: Option<u64>,

    /// Current attempt, starting at 0.
    pub attempt: u32,
}

impl Progress {
    pub(crate) fn new(phase: FetchPhase, attempt: u32) -> Self {
        Self {
            phase,
            bytes_downloaded: 0,
            total_bytes: None,
            attempt,
        }
    }

    /// Completion percentage, if the total size is known.
    pub fn percentage(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(100.0),
            Some(total) => Some((self.bytes_downloaded as f64 / total as f64) * 100.0),
            None => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == FetchPhase::Completed
    }
}

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;

const PB_STYLE: &str = "{spinner:.blue} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

/// One progress bar at a time, shared by download and extraction callbacks.
#[derive(Default)]
pub struct ProgressTracker {
    pb: Mutex<Option<ProgressBar>>,
}

impl ProgressTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn start(len: Option<u64>) -> ProgressBar {
        let pb = match len {
            Some(len) => ProgressBar::new(len),
            None => ProgressBar::no_length(),
        };
        if let Some(style) = PB_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        pb
    }

    /// Move the current bar to `position`, starting one if none is active.
    pub fn update(&self, position: u64, len: Option<u64>) {
        let Ok(mut slot) = self.pb.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| Self::start(len));
        if let Some(len) = len {
            if pb.length() != Some(len) {
                pb.set_length(len);
            }
        }
        pb.set_position(position);
    }

    pub fn finish(&self) {
        if let Ok(mut slot) = self.pb.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }

    pub fn fetch_callback(self: &Arc<Self>) -> Arc<dyn Fn(&relsync_fetch::Progress) + Send + Sync> {
        let tracker = Arc::clone(self);
        Arc::new(move |progress: &relsync_fetch::Progress| {
            use relsync_fetch::FetchPhase;
            match progress.phase {
                FetchPhase::Connecting => tracker.finish(),
                FetchPhase::Downloading => {
                    tracker.update(progress.bytes_downloaded, progress.total_bytes)
                }
                FetchPhase::Committing => {}
                FetchPhase::Completed => tracker.finish(),
            }
        })
    }

    pub fn extract_callback(
        self: &Arc<Self>,
    ) -> Arc<dyn Fn(&relsync_archive::Progress) + Send + Sync> {
        let tracker = Arc::clone(self);
        Arc::new(move |progress: &relsync_archive::Progress| {
            if progress.finished {
                tracker.finish();
            } else {
                tracker.update(progress.bytes_processed, Some(progress.total_bytes));
            }
        })
    }
}

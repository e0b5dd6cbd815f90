use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use relsync_fs::prune_oldest;
use relsync_install::{HookError, PipelineHook, RunReport};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::LogConfig;

const LOG_PREFIX: &str = "relsync_";
const LOG_SUFFIX: &str = ".log";
const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Keeps the file writer alive; dropping it flushes buffered lines.
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

pub fn run_log_name(started: DateTime<Local>) -> String {
    format!("{LOG_PREFIX}{}{LOG_SUFFIX}", started.format("%Y%m%d_%H%M%S"))
}

pub fn is_run_log(name: &str) -> bool {
    name.starts_with(LOG_PREFIX) && name.ends_with(LOG_SUFFIX)
}

/// Install the global subscriber: console output filtered by `RUST_LOG` or
/// the configured level, plus a debug-level file per run when enabled.
pub fn init(config: &LogConfig, verbose: bool) -> Result<LogGuard> {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{level}'"))?;

    let console = fmt::layer()
        .with_target(false)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
        .with_filter(console_filter);

    let (file_layer, worker, file) = if config.save_enabled {
        fs::create_dir_all(&config.dir)
            .with_context(|| format!("Failed to create log directory {}", config.dir.display()))?;
        let path = config.dir.join(run_log_name(Local::now()));
        let handle = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(handle);

        let layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
            .with_writer(writer)
            .with_filter(LevelFilter::DEBUG);
        (Some(layer), Some(guard), Some(path))
    } else {
        (None, None, None)
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    if let Some(path) = &file {
        info!(path = %path.display(), "writing log file");
    }

    Ok(LogGuard { _worker: worker })
}

/// Deletes the oldest run logs once a run has finished.
pub struct LogRetentionHook {
    dir: PathBuf,
    keep: usize,
}

impl LogRetentionHook {
    pub fn new(config: &LogConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            keep: config.max_files,
        }
    }
}

impl PipelineHook for LogRetentionHook {
    fn name(&self) -> &'static str {
        "log_retention"
    }

    fn on_finish(&self, _report: &RunReport) -> Result<(), HookError> {
        let removed =
            prune_oldest(&self.dir, self.keep, is_run_log).map_err(|e| HookError::new(self.name(), e))?;
        debug!(removed = removed.len(), keep = self.keep, "pruned run logs");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    #[test]
    fn test_run_log_name() {
        let started = Local.with_ymd_and_hms(2025, 3, 9, 7, 5, 1).unwrap();
        let name = run_log_name(started);
        assert_eq!(name, "relsync_20250309_070501.log");
        assert!(is_run_log(&name));
        assert!(!is_run_log("relsync.toml"));
        assert!(!is_run_log("other_20250309_070501.log"));
    }

    #[test]
    fn test_retention_keeps_newest_run_logs() {
        let dir = tempdir().unwrap();
        let base = SystemTime::now() - Duration::from_secs(3600);
        for i in 0..4u64 {
            let path = dir.path().join(format!("relsync_2025010{i}_000000.log"));
            let file = File::create(&path).unwrap();
            file.set_modified(base + Duration::from_secs(i * 60)).unwrap();
        }
        fs::write(dir.path().join("notes.log"), "keep me").unwrap();

        let hook = LogRetentionHook {
            dir: dir.path().to_path_buf(),
            keep: 2,
        };
        hook.on_finish(&RunReport::default()).unwrap();

        let mut left: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        left.sort();
        assert_eq!(
            left,
            [
                "notes.log",
                "relsync_20250102_000000.log",
                "relsync_20250103_000000.log"
            ]
        );
    }

    #[test]
    fn test_retention_without_log_dir() {
        let dir = tempdir().unwrap();
        let hook = LogRetentionHook {
            dir: dir.path().join("missing"),
            keep: 1,
        };
        assert!(hook.on_finish(&RunReport::default()).is_ok());
    }
}

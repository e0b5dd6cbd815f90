use std::sync::Arc;

use anyhow::{Context, Result};
use relsync_fetch::{ClientSetting, FetchOptions, Fetcher};
use relsync_fs::Staging;
use relsync_install::{Pipeline, ReleaseSettings, Rollout, RunReport};
use relsync_release::{GithubReleases, ReleasePlan};
use tracing::{error, info};

use crate::cli::Mode;
use crate::config::Config;
use crate::logging::LogRetentionHook;
use crate::tracker::ProgressTracker;

/// Run one mode to completion. `Ok(false)` means the run failed and the
/// failure has already been logged.
pub fn execute(config: &Config, mode: Mode) -> Result<bool> {
    let tracker = ProgressTracker::new();
    let rollout = rollout(config, &tracker);

    let outcome = match mode {
        Mode::Local { minimal, full } => {
            info!(minimal = %minimal.display(), "deploying local archives");
            rollout.deploy_local(&minimal, full.as_deref())
        }
        Mode::DryRun => {
            let pipeline = build_pipeline(config, rollout, &tracker)?;
            return match pipeline.resolve() {
                Ok(plan) => {
                    print_plan(&plan);
                    Ok(true)
                }
                Err(e) => {
                    error!("{e}");
                    Ok(false)
                }
            };
        }
        Mode::Update => build_pipeline(config, rollout, &tracker)?.run(),
    };
    tracker.finish();

    Ok(match outcome {
        Ok(report) => summarize(&report),
        Err(e) => {
            error!("{e}");
            false
        }
    })
}

fn rollout(config: &Config, tracker: &Arc<ProgressTracker>) -> Rollout {
    let mut rollout = Rollout::new(Staging::new(&config.paths.staging), config.targets())
        .on_progress(tracker.extract_callback());
    // Only runs that write a log file rotate the log directory.
    if config.logs.save_enabled {
        rollout = rollout.hook(LogRetentionHook::new(&config.logs));
    }
    rollout
}

type HttpPipeline = Pipeline<GithubReleases<relsync_fetch::ReqwestClient>, relsync_fetch::ReqwestClient>;

fn build_pipeline(
    config: &Config,
    rollout: Rollout,
    tracker: &Arc<ProgressTracker>,
) -> Result<HttpPipeline> {
    let metadata = ClientSetting::metadata()
        .proxy(config.proxy())
        .build()
        .context("Failed to build HTTP client")?;
    let download = ClientSetting::download()
        .proxy(config.proxy())
        .build()
        .context("Failed to build HTTP client")?;

    let source = GithubReleases::with_api_base(metadata, config.release.api_base.clone());
    let fetcher = Fetcher::new(
        download,
        FetchOptions::default().on_progress(tracker.fetch_callback()),
    );
    let settings = ReleaseSettings {
        repo: config.repo()?,
        channel: config.release.channel,
        naming: config.naming.clone(),
        full_download_enabled: config.release.full_download_enabled,
    };

    Ok(Pipeline::new(source, fetcher, settings, rollout))
}

fn summarize(report: &RunReport) -> bool {
    for result in &report.results {
        let status = if result.success { "ok" } else { "FAILED" };
        info!(target = %result.target.display(), status, "result");
    }
    report.success()
}

fn print_plan(plan: &ReleasePlan) {
    println!("release   {} ({})", plan.release.tag, plan.version());
    println!(
        "minimal   {} [{}] {} bytes",
        plan.minimal.asset.name, plan.minimal.token, plan.minimal.asset.size
    );
    match &plan.full {
        Some(full) => println!(
            "full      {} [{}] {} bytes",
            full.asset.name, full.token, full.asset.size
        ),
        None => println!("full      none"),
    }
    for candidate in &plan.full_candidates {
        println!(
            "          candidate {} ({} bytes)",
            candidate.asset.name, candidate.asset.size
        );
    }
}

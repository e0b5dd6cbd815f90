use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

mod cli;
mod config;
mod logging;
mod run;
mod tracker;

use cli::{App, Mode};
use config::Config;

/// Exit status for a run abandoned on Ctrl+C.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let app = App::parse();

    let config = match config::load_or_init(&app.config) {
        Ok(Some(config)) => config,
        Ok(None) => {
            println!("Wrote a default configuration to {}.", app.config.display());
            println!("Edit it and run relsync again.");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _guard = match logging::init(&config.logs, app.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(version = env!("CARGO_PKG_VERSION"), "relsync starting");
    let code = runtime.block_on(supervise(config, app.mode()));
    // an interrupted run is still blocking a worker thread
    runtime.shutdown_background();
    code
}

/// Run the update on a blocking thread and race it against Ctrl+C.
async fn supervise(config: Config, mode: Mode) -> ExitCode {
    let task = tokio::task::spawn_blocking(move || run::execute(&config, mode));

    tokio::select! {
        joined = task => match joined {
            Ok(Ok(true)) => {
                info!("update finished");
                ExitCode::SUCCESS
            }
            Ok(Ok(false)) => {
                error!("update failed");
                ExitCode::FAILURE
            }
            Ok(Err(e)) => {
                error!("{e:#}");
                ExitCode::FAILURE
            }
            Err(e) => {
                error!(error = %e, "update task aborted");
                ExitCode::FAILURE
            }
        },
        _ = interrupted() => {
            error!("interrupted, abandoning the run");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

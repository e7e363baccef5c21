#![warn(missing_docs)]

//! Entry point for the `focustally` binary.

mod cli;
mod error;
mod stats;

use std::{env, io, path::Path, process, time::Duration};

use tally::{SamplerConfig, run_until, shutdown_signal};
use tokio::runtime::Runtime;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, registry};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

/// Exit status after a requested shutdown has flushed the store.
const STOPPED_EXIT_CODE: i32 = 130;

/// Grace period for in-flight focus queries once the store is saved.
const RUNTIME_SHUTDOWN_TIMEOUT: Duration = Duration::from_millis(200);

/// How the process finished when no error occurred.
enum Outcome {
    /// A one-shot command completed.
    Done,
    /// The sampler was stopped by a signal and its counts were saved.
    Stopped,
}

fn main() {
    match run() {
        Ok(Outcome::Done) => {}
        Ok(Outcome::Stopped) => process::exit(STOPPED_EXIT_CODE),
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}

/// Parse CLI arguments, install logging, and dispatch.
fn run() -> Result<Outcome> {
    let Some(Cli {
        log,
        db,
        interval,
        command,
    }) = Cli::parse_known_from(env::args_os()).unwrap_or_else(|err| err.exit())
    else {
        return Ok(Outcome::Done);
    };
    registry()
        .with(logging::env_filter_from_spec(&log.spec()))
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()
        .ok();

    let db = env::current_dir()?.join(db);
    match command {
        Some(Commands::Stats(args)) => {
            stats::run(&db, &args)?;
            Ok(Outcome::Done)
        }
        Some(Commands::Other(_)) => Ok(Outcome::Done),
        None => sample(&db, interval),
    }
}

/// Sample until SIGINT/SIGTERM, then flush the store to `db`.
fn sample(db: &Path, interval: Duration) -> Result<Outcome> {
    let runtime = Runtime::new()?;
    let probe = focus_probe::native();
    let result = runtime.block_on(run_until(
        db,
        probe,
        SamplerConfig::with_interval(interval),
        shutdown_signal(),
    ));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_TIMEOUT);
    result?;
    Ok(Outcome::Stopped)
}

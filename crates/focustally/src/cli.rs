//! Command-line interface definitions for focustally.

use std::{ffi::OsString, path::PathBuf, time::Duration};

use clap::{Args, Error as ClapError, Parser, Subcommand, error::ErrorKind};
use logging::LogArgs;

/// Store file used when `--db` is not given, relative to the working directory.
pub const DEFAULT_DB: &str = "db.json";

/// Command-line interface for the `focustally` binary.
///
/// Without a subcommand the sampler runs until interrupted. Unrecognized
/// commands and arguments do nothing.
#[derive(Parser, Debug)]
#[command(
    name = "focustally",
    about = "Count how long each application holds window focus",
    version,
    allow_external_subcommands = true
)]
pub struct Cli {
    /// Logging controls shared across workspace binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Activity store file, resolved against the working directory at startup.
    #[arg(long, global = true, default_value = DEFAULT_DB, value_name = "PATH")]
    pub db: PathBuf,

    /// Time between samples of the focused window.
    #[arg(
        long,
        value_parser = parse_interval,
        default_value = "1s",
        value_name = "DURATION"
    )]
    pub interval: Duration,

    /// Report instead of sampling.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the persisted counts.
    Stats(StatsArgs),
    /// Anything else; ignored.
    #[command(external_subcommand)]
    Other(Vec<String>),
}

impl Cli {
    /// Parse `args`, returning `None` when they contain something we do not
    /// recognize. Help, version and invalid values are still clap errors.
    pub fn parse_known_from<I, T>(args: I) -> Result<Option<Self>, ClapError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(cli) => Ok(Some(cli)),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::UnknownArgument | ErrorKind::InvalidSubcommand
                ) =>
            {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct StatsArgs {
    /// Print one `count<TAB>label` line per application, highest first,
    /// instead of the raw file.
    #[arg(long)]
    pub sorted: bool,

    /// Extra arguments; ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

/// Parse a human-readable, non-zero duration such as `1s` or `500ms`.
fn parse_interval(s: &str) -> Result<Duration, String> {
    let interval = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if interval.is_zero() {
        return Err("interval must be greater than zero".to_string());
    }
    Ok(interval)
}

//! These structs provide the CLI interface for the ynab-monitor binary.

use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// ynab-monitor: projects the minimum future balance of a YNAB account.
///
/// The program expands your scheduled transactions over a monitoring window,
/// nets pending credit-card payments against the transfers that already
/// cover them, walks the window day by day to find the lowest projected
/// balance, and notifies your configured channels when that minimum drops
/// below your threshold.
///
/// You will need a YNAB personal access token; see
/// https://api.ynab.com/#personal-access-tokens for how to create one.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run one projection cycle and exit.
    ///
    /// Fetches a fresh snapshot from YNAB, computes the projected minimum
    /// balance, prints the projection report, and sends an alert
    /// notification if the minimum falls below the configured threshold.
    Check(CheckArgs),

    /// Run projection cycles on the configured schedule until interrupted.
    ///
    /// At least one of `schedule` or `update_schedule` must be present in
    /// the config file. Cycles never overlap, and a shutdown signal is
    /// honored between cycles.
    Watch,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate
    /// for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The path to the configuration file.
    #[arg(long, env = "YNAB_MONITOR_CONFIG", default_value_t = default_config_path())]
    config: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: PathBuf) -> Self {
        Self {
            log_level,
            config: config.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> &DisplayPath {
        &self.config
    }
}

/// Args for the `check` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct CheckArgs {
    /// Also send a routine update notification, regardless of the threshold.
    #[arg(long)]
    update: bool,
}

impl CheckArgs {
    pub fn new(update: bool) -> Self {
        Self { update }
    }

    pub fn update(&self) -> bool {
        self.update
    }
}

fn default_config_path() -> DisplayPath {
    DisplayPath(match dirs::config_dir() {
        Some(dir) => dir.join("ynab-monitor").join("config.json"),
        None => {
            error!(
                "There was an error when trying to get your configuration directory. You can get \
                around this by providing --config or YNAB_MONITOR_CONFIG instead of relying on \
                the default configuration path. If you continue using the program right now, you \
                may have problems!",
            );
            PathBuf::from("config.json")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

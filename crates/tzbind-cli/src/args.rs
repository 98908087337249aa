use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DateCommands, DateTimeCommands, TimeCommands};

/// Render and commit timezone-aware form field values
///
/// tzb drives the same binders a form uses: `render` shows what a date or
/// time control would display for a stored value, `commit` shows what a
/// typed control value would be stored as. Instants are converted through
/// the session timezone; civil dates and clock times are not.
#[derive(Parser)]
#[command(version, about, name = "tzb")]
pub struct Args {
    /// IANA timezone to use, e.g. America/Los_Angeles. Defaults to the
    /// config file, then the system timezone
    #[arg(short = 'z', long, global = true)]
    pub timezone: Option<String>,

    /// Path to a JSON config file. Defaults to
    /// $XDG_CONFIG_HOME/tzbind/config.json when present
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Do not annotate labels with the timezone abbreviation
    #[arg(long, global = true)]
    pub no_zone_abbr: bool,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the tzb CLI
///
/// - `datetime`: instants edited as local datetimes
/// - `date`: civil dates or instants edited as local dates
/// - `time`: wall-clock times, never converted
/// - `zone`: show the resolved session timezone
#[derive(Subcommand)]
pub enum Commands {
    /// Bind instants to datetime-local controls
    #[command(alias = "dt")]
    Datetime {
        #[command(subcommand)]
        command: DateTimeCommands,
    },
    /// Bind dates to date controls
    #[command(alias = "d")]
    Date {
        #[command(subcommand)]
        command: DateCommands,
    },
    /// Bind clock times to time controls
    #[command(alias = "t")]
    Time {
        #[command(subcommand)]
        command: TimeCommands,
    },
    /// Show the session timezone
    #[command(alias = "z")]
    Zone,
}

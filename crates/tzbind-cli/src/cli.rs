//! Command-line argument wrappers and their handlers.
//!
//! Argument structs carry clap attributes only; each converts into a core
//! binder through a `field()` method so the binders stay free of CLI
//! concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Binder → render / commit
//! ```

use std::fmt;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jiff::Timestamp;
use log::debug;
use serde::Serialize;
use tzbind_core::{
    convert, ClockTime, ClockTimeField, Config, DateField, DateMode, DateTimeField, DateValue,
    FieldBinder, FieldOptions, FormContext, InputPrecision, RenderedField, TimezoneSource,
};

use crate::renderer::TerminalRenderer;

/// Flags shared by every render command.
#[derive(Args)]
pub struct FieldArgs {
    /// Field label
    #[arg(short, long)]
    pub label: Option<String>,
    /// Mark the field as required
    #[arg(long)]
    pub required: bool,
    /// Mark the field as disabled
    #[arg(long)]
    pub disabled: bool,
}

impl FieldArgs {
    fn options(&self, config: &Config, default_label: &str) -> FieldOptions {
        config
            .field_options(self.label.as_deref().unwrap_or(default_label))
            .required(self.required)
            .disabled(self.disabled)
    }
}

/// Flags that affect what a commit stores.
#[derive(Args)]
pub struct CommitFieldArgs {
    /// Field label, used in error messages
    #[arg(short, long)]
    pub label: Option<String>,
    /// Reject blank input instead of committing null
    #[arg(long)]
    pub required: bool,
}

impl CommitFieldArgs {
    fn options(&self, config: &Config, default_label: &str) -> FieldOptions {
        config
            .field_options(self.label.as_deref().unwrap_or(default_label))
            .required(self.required)
    }
}

/// Render a stored instant
///
/// Shows the local datetime a datetime-local control displays for VALUE in
/// the session timezone. Omit VALUE (or pass "") for an unset field.
#[derive(Args)]
pub struct DateTimeRenderArgs {
    /// Stored instant, e.g. 2024-01-16T02:30:00Z
    pub value: Option<String>,
    /// Earliest allowed instant
    #[arg(long)]
    pub min: Option<Timestamp>,
    /// Latest allowed instant
    #[arg(long)]
    pub max: Option<Timestamp>,
    /// Render with second precision
    #[arg(long)]
    pub seconds: bool,
    #[command(flatten)]
    pub field: FieldArgs,
}

impl DateTimeRenderArgs {
    fn field(&self, config: &Config) -> DateTimeField {
        let mut field = DateTimeField::new(self.field.options(config, "Date and time"))
            .with_precision(precision(config, self.seconds));
        if let Some(min) = self.min {
            field = field.with_min(min);
        }
        if let Some(max) = self.max {
            field = field.with_max(max);
        }
        field
    }
}

/// Commit a local datetime
///
/// Converts INPUT, as typed into a datetime-local control, into the instant
/// it names in the session timezone. "" commits as null.
#[derive(Args)]
pub struct DateTimeCommitArgs {
    /// Control value, e.g. 2024-01-15T18:30
    pub input: String,
    /// Instant currently stored in the field. Resolves times in a repeated
    /// DST hour to the same side as this value
    #[arg(long)]
    pub current: Option<Timestamp>,
    #[command(flatten)]
    pub field: CommitFieldArgs,
}

impl DateTimeCommitArgs {
    fn field(&self, config: &Config) -> DateTimeField {
        DateTimeField::new(self.field.options(config, "Date and time"))
    }
}

#[derive(Subcommand)]
pub enum DateTimeCommands {
    /// Render a stored instant
    #[command(alias = "r")]
    Render(DateTimeRenderArgs),
    /// Commit a local datetime
    #[command(alias = "c")]
    Commit(DateTimeCommitArgs),
}

/// Render a stored date
///
/// VALUE may be a bare date (2015-04-02), shown unchanged in every
/// timezone, or an instant (2024-01-16T02:30:00Z), shown as the local day
/// it falls on.
#[derive(Args)]
pub struct DateRenderArgs {
    /// Stored date or instant
    pub value: Option<String>,
    /// Earliest allowed date or instant
    #[arg(long)]
    pub min: Option<DateValue>,
    /// Latest allowed date or instant
    #[arg(long)]
    pub max: Option<DateValue>,
    #[command(flatten)]
    pub field: FieldArgs,
}

impl DateRenderArgs {
    fn field(&self, config: &Config) -> DateField {
        let mut field = DateField::new(self.field.options(config, "Date"));
        if let Some(min) = self.min {
            field = field.with_min(min);
        }
        if let Some(max) = self.max {
            field = field.with_max(max);
        }
        field
    }
}

/// Commit a local date
///
/// Stores INPUT as a bare date, or with --instant as the instant the day
/// starts in the session timezone. "" commits as null.
#[derive(Args)]
pub struct DateCommitArgs {
    /// Control value, e.g. 2015-04-02
    pub input: String,
    /// Store the start of the day as an instant
    #[arg(long)]
    pub instant: bool,
    #[command(flatten)]
    pub field: CommitFieldArgs,
}

impl DateCommitArgs {
    fn field(&self, config: &Config) -> DateField {
        let mode = if self.instant {
            DateMode::Instant
        } else {
            DateMode::Civil
        };
        DateField::new(self.field.options(config, "Date")).with_mode(mode)
    }
}

#[derive(Subcommand)]
pub enum DateCommands {
    /// Render a stored date
    #[command(alias = "r")]
    Render(DateRenderArgs),
    /// Commit a local date
    #[command(alias = "c")]
    Commit(DateCommitArgs),
}

/// Render a stored clock time
#[derive(Args)]
pub struct TimeRenderArgs {
    /// Stored time, e.g. 18:30
    pub value: Option<String>,
    /// Earliest allowed time
    #[arg(long)]
    pub min: Option<String>,
    /// Latest allowed time
    #[arg(long)]
    pub max: Option<String>,
    #[command(flatten)]
    pub field: FieldArgs,
}

impl TimeRenderArgs {
    fn field(&self, config: &Config) -> ClockTimeField {
        let mut field = ClockTimeField::new(self.field.options(config, "Time"));
        if let Some(min) = self.min.as_deref() {
            field = field.with_min(ClockTime::new(min));
        }
        if let Some(max) = self.max.as_deref() {
            field = field.with_max(ClockTime::new(max));
        }
        field
    }
}

/// Commit a clock time
///
/// The value is stored exactly as typed; "" commits as null.
#[derive(Args)]
pub struct TimeCommitArgs {
    /// Control value, e.g. 18:30
    pub input: String,
    #[command(flatten)]
    pub field: CommitFieldArgs,
}

impl TimeCommitArgs {
    fn field(&self, config: &Config) -> ClockTimeField {
        ClockTimeField::new(self.field.options(config, "Time"))
    }
}

#[derive(Subcommand)]
pub enum TimeCommands {
    /// Render a stored clock time
    #[command(alias = "r")]
    Render(TimeRenderArgs),
    /// Commit a clock time
    #[command(alias = "c")]
    Commit(TimeCommitArgs),
}

fn precision(config: &Config, seconds: bool) -> InputPrecision {
    if seconds {
        InputPrecision::Second
    } else {
        config.precision
    }
}

/// Parses an optional stored value; absent and blank both mean unset.
fn parse_stored<T, F>(value: Option<&str>, parse: F) -> Result<Option<T>>
where
    F: FnOnce(&str) -> tzbind_core::Result<T>,
{
    match value {
        Some(value) if !value.trim().is_empty() => parse(value)
            .map(Some)
            .with_context(|| format!("Invalid stored value '{value}'")),
        _ => Ok(None),
    }
}

#[derive(Serialize)]
struct CommitOutput<T> {
    value: Option<T>,
}

#[derive(Serialize)]
struct ZoneReport {
    timezone: String,
    abbreviation: String,
    local_now: String,
    precision: InputPrecision,
    show_zone_abbr: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
}

impl fmt::Display for ZoneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.timezone)?;
        writeln!(f)?;
        writeln!(f, "- **Abbreviation**: {}", self.abbreviation)?;
        writeln!(f, "- **Local time**: {}", self.local_now)?;
        writeln!(f, "- **Precision**: {}", self.precision)?;
        writeln!(f, "- **Zone in labels**: {}", self.show_zone_abbr)?;
        if let Some(path) = &self.config_file {
            writeln!(f, "- **Config file**: {path}")?;
        }
        Ok(())
    }
}

/// Executes parsed commands against the resolved configuration.
pub struct Cli {
    config: Config,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(config: Config, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            config,
            renderer,
            json,
        }
    }

    pub fn handle_datetime_command(&self, command: DateTimeCommands) -> Result<()> {
        let ctx = self.context();
        match command {
            DateTimeCommands::Render(args) => {
                let value = parse_stored(args.value.as_deref(), convert::parse_instant)?;
                let rendered = args.field(&self.config).render(value.as_ref(), &ctx);
                self.emit_field(&rendered)
            }
            DateTimeCommands::Commit(args) => {
                let field = args.field(&self.config);
                let value = field.check_required(
                    field
                        .commit_near(&args.input, &ctx, args.current)
                        .context("Failed to commit datetime")?,
                )?;
                self.emit_commit(value)
            }
        }
    }

    pub fn handle_date_command(&self, command: DateCommands) -> Result<()> {
        let ctx = self.context();
        match command {
            DateCommands::Render(args) => {
                let value = parse_stored(args.value.as_deref(), DateValue::sniff)?;
                let rendered = args.field(&self.config).render(value.as_ref(), &ctx);
                self.emit_field(&rendered)
            }
            DateCommands::Commit(args) => {
                let value = args
                    .field(&self.config)
                    .commit_checked(&args.input, &ctx)
                    .context("Failed to commit date")?;
                self.emit_commit(value)
            }
        }
    }

    pub fn handle_time_command(&self, command: TimeCommands) -> Result<()> {
        let ctx = self.context();
        match command {
            TimeCommands::Render(args) => {
                let value =
                    parse_stored(args.value.as_deref(), |value| Ok(ClockTime::new(value)))?;
                let rendered = args.field(&self.config).render(value.as_ref(), &ctx);
                self.emit_field(&rendered)
            }
            TimeCommands::Commit(args) => {
                let value = args
                    .field(&self.config)
                    .commit_checked(&args.input, &ctx)
                    .context("Failed to commit time")?;
                self.emit_commit(value)
            }
        }
    }

    pub fn show_zone(&self) -> Result<()> {
        let ctx = self.context();
        let report = ZoneReport {
            timezone: ctx.timezone().name().to_string(),
            abbreviation: ctx.zone_abbr(),
            local_now: convert::utc_to_local_input(
                ctx.reference(),
                ctx.timezone(),
                self.config.precision,
            ),
            precision: self.config.precision,
            show_zone_abbr: self.config.show_zone_abbr,
            config_file: self
                .config
                .source
                .as_ref()
                .map(|path| path.display().to_string()),
        };
        if self.json {
            self.print_json(&report)
        } else {
            self.renderer.render(&report.to_string())
        }
    }

    /// A fresh context per command so the zone is read at use time.
    fn context(&self) -> FormContext {
        self.config.timezone.context()
    }

    fn emit_field(&self, field: &RenderedField) -> Result<()> {
        debug!("Rendered {field:?}");
        if self.json {
            self.print_json(field)
        } else {
            self.renderer.render(&field.to_string())
        }
    }

    fn emit_commit<T: Serialize + fmt::Display>(&self, value: Option<T>) -> Result<()> {
        if self.json {
            return self.print_json(&CommitOutput { value });
        }
        let line = match value {
            Some(value) => format!("{value}\n"),
            None => "null\n".to_string(),
        };
        self.renderer.render(&line)
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }
}

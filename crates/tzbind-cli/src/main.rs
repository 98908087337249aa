//! tzb CLI Application
//!
//! Command-line front end for the tzbind field binders.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use tzbind_core::ConfigBuilder;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        timezone,
        config_file,
        no_zone_abbr,
        no_color,
        json,
        command,
    } = Args::parse();

    let config = ConfigBuilder::new()
        .with_config_path(config_file)
        .with_timezone(timezone)
        .with_zone_abbr(no_zone_abbr.then_some(false))
        .build()
        .context("Failed to resolve configuration")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("tzb started in {}", config.timezone);

    let cli = Cli::new(config, renderer, json);
    match command {
        Some(Datetime { command }) => cli.handle_datetime_command(command),
        Some(Date { command }) => cli.handle_date_command(command),
        Some(Time { command }) => cli.handle_time_command(command),
        Some(Zone) | None => cli.show_zone(),
    }
}

//! Cadence CLI Application
//!
//! Command-line front end for the cadence plan scheduler.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, ListArgs};
use cadence_core::SchedulerBuilder;
use clap::Parser;
use cli::Cli;
use jiff::Zoned;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        today,
        no_notify,
        command,
    } = Args::parse();

    let scheduler = SchedulerBuilder::new()
        .with_database_path(database_file)
        .with_notifications(!no_notify)
        .build()
        .await
        .context("Failed to initialize scheduler")?;

    let today = today.unwrap_or_else(|| Zoned::now().date());
    let cli = Cli::new(scheduler, TerminalRenderer::new(!no_color), json, today);

    info!("Cadence started, today is {today}");

    match command {
        Some(command) => cli.handle(command).await,
        None => cli.list(ListArgs::default()).await,
    }
}

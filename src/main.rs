// Rust Scheduler
// Command-line front end for the layout engine

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use rust_scheduler::services::indicator::{CurrentTimeTracker, IndicatorTicker, SystemClock};
use rust_scheduler::services::settings::load_settings_or_default;
use rust_scheduler::{Event, Key, Resource, Scheduler};

#[derive(Debug, Parser)]
#[command(name = "rust-scheduler", about = "Lay out scheduler views from JSON event data", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the layout of one view as JSON
    Layout {
        /// JSON array of events
        #[arg(long)]
        events: PathBuf,

        /// JSON array of resources
        #[arg(long)]
        resources: Option<PathBuf>,

        /// TOML settings file (defaults to $RUST_SCHEDULER_CONFIG or the user config dir)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Date to show, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Resource id of the selected tab
        #[arg(long)]
        tab: Option<String>,
    },

    /// Print the current-time marker position
    Now {
        #[arg(long)]
        config: Option<PathBuf>,

        /// Keep printing updates until interrupted
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Layout {
            events,
            resources,
            config,
            date,
            tab,
        } => run_layout(&events, resources.as_deref(), config.as_deref(), date, tab),
        Command::Now { config, watch } => run_now(config.as_deref(), watch).await,
    }
}

fn run_layout(
    events_path: &Path,
    resources_path: Option<&Path>,
    config_path: Option<&Path>,
    date: Option<NaiveDate>,
    tab: Option<String>,
) -> Result<()> {
    let mut settings = load_settings_or_default(config_path);
    if let Some(date) = date {
        settings.view.selected_date = date;
    }

    let events: Vec<Event> = read_json(events_path)?;
    let resources: Vec<Resource> = match resources_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    log::info!("Laying out {} events across {} resources", events.len(), resources.len());

    let mut scheduler = Scheduler::new(settings)
        .with_resources(resources)
        .with_events(events);
    if let Some(tab) = tab {
        scheduler.select_tab(&Key::parse(&tab));
    }

    let output = serde_json::to_string_pretty(scheduler.layout()).context("Failed to serialise layout")?;
    println!("{}", output);
    Ok(())
}

async fn run_now(config_path: Option<&Path>, watch_updates: bool) -> Result<()> {
    let settings = load_settings_or_default(config_path);
    let mut scheduler = Scheduler::new(settings);
    let params = scheduler.indicator_params();

    if !watch_updates {
        let update = CurrentTimeTracker::new(params).tick(&SystemClock);
        println!("{}", serde_json::to_string_pretty(&update)?);
        return Ok(());
    }

    let (_params_tx, params_rx) = watch::channel(params);
    let (_ticker, mut updates) = IndicatorTicker::spawn(Arc::new(SystemClock), params_rx);

    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(update) => println!("{}", serde_json::to_string(&update)?),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("Interrupted, stopping");
                break;
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

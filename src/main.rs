//! animal-table: an editable, sortable table of animals in the terminal
//!
//! Built on the ratatui Component Architecture: components turn terminal
//! events into Actions, and the App applies them to the tables.

mod action;
mod app;
mod component;
mod components;
mod config;
mod error;
mod model;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::{JsonFileStorage, Storage};
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "animal-table.log";

#[derive(Parser, Debug)]
#[command(name = "animal-table")]
#[command(version)]
#[command(about = "An editable, sortable table of animals in the terminal")]
struct Args {
    /// Config file (defaults to <config dir>/animal-table/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for persisted tables and the log file
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log filter, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(Config::platform_data_dir);
    init_tracing(&log_dir, &args.log_level)?;

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    let data_dir = config.resolve_data_dir();
    info!(
        "Starting with {} tables, data in {}",
        config.tables.len(),
        data_dir.display()
    );

    let storage: Rc<dyn Storage> = Rc::new(JsonFileStorage::new(data_dir));
    let mut app = App::new(&config, storage);

    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(250));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        tracing::error!("Exiting on error: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("Bye");
    Ok(())
}

/// The terminal belongs to the UI, so logs go to a file
fn init_tracing(dir: &Path, default_filter: &str) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(filter)
        .init();
    Ok(())
}

fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!("Draw error: {}", e);
            }
        })?;

        let Some(event) = tui.next_event()? else {
            app.update(Action::Tick)?;
            continue;
        };

        let action = match event {
            Event::Key(key) => app.handle_key_event(key)?,
            Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        };

        // An action can produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            tracing::debug!("Action: {}", a);
            current_action = app.update(a)?;
        }
    }

    Ok(())
}

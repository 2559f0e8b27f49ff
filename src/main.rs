use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::Value;
use std::{
    fs::File,
    io::{stderr, BufReader},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing_subscriber::EnvFilter;

use checklist::{ContainerId, Options};
use wrap_context::{arg_context, liab, raw_context, wohyna};

// Paths used by the context macros.
use checklist::{types, utils};

mod app;
mod event;
mod handler;
mod pane_model;
mod pane_view;
mod textline_model;
mod textline_view;
mod tui;
mod view_model;

use crate::{app::App, event::EventHandler, tui::Tui, types::DEBUG_PRINT_LIMIT};

/// Dropdown checklists in the terminal
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Options files, one container per file named after the file stem
    #[arg(value_name = "FILE", required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Overrides the `trigger` option of every file (hover, click)
    #[arg(short, long)]
    trigger: Option<String>,

    /// Overrides the `placement` option of every file (replace, prepend, append)
    #[arg(short, long)]
    placement: Option<String>,

    /// Log option problems of every checklist and lifecycle events
    #[arg(long)]
    debug: bool,

    /// Log file
    #[arg(short, long, default_value = "checklist.log")]
    log_file: PathBuf,

    /// Debug print limit
    #[arg(short, long, default_value = "32")]
    debug_print_limit: usize,
}

fn init_logging(path: &Path, debug: bool) -> anyhow::Result<()> {
    let file = arg_context!(File::create(path))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

    raw_context!(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| wohyna!("Failed to install the log subscriber: {}", err)))
}

fn container_id(path: &Path) -> anyhow::Result<ContainerId> {
    match path.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => anyhow::Ok(ContainerId::new(stem)),
        None => liab!("No usable file stem in {:?}", path),
    }
}

fn read_options(path: &Path, cli: &Cli) -> anyhow::Result<Options> {
    let bufreader = BufReader::new(arg_context!(File::open(path))?);
    let value: Value = raw_context!(serde_json::from_reader(bufreader))?;
    let mut options = raw_context!(Options::try_from(value))?;

    if let Some(trigger) = cli.trigger.as_deref() {
        options.set("trigger", trigger);
    }
    if let Some(placement) = cli.placement.as_deref() {
        options.set("placement", placement);
    }

    anyhow::Ok(options)
}

fn read_containers(cli: &Cli) -> anyhow::Result<Vec<(ContainerId, Options)>> {
    let mut containers: Vec<(ContainerId, Options)> = Vec::default();

    for path in cli.files.iter() {
        let id = arg_context!(container_id(path))?;
        if containers.iter().any(|(known, _)| known == &id) {
            liab!("Two files map to the container {:?}", id.as_str());
        }

        let options = raw_context!(read_options(path, cli))?;
        containers.push((id, options));
    }

    anyhow::Ok(containers)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    raw_context!(DEBUG_PRINT_LIMIT
        .set(args.debug_print_limit)
        .map_err(|err| wohyna!("Second initialization with value: {:?}", err)))?;

    arg_context!(init_logging(&args.log_file, args.debug))?;

    let containers = raw_context!(read_containers(&args))?;
    tracing::info!(containers = containers.len(), "options loaded");

    let backend = CrosstermBackend::new(stderr());
    let terminal = raw_context!(Terminal::new(backend))?;
    let terminal_size = arg_context!(terminal.size())?;
    let events = EventHandler::new(250);

    let mut tui = Tui::new(terminal, events);
    arg_context!(tui.init()).map_err(|err| {
        tui.restore();
        err
    })?;

    let mut app = raw_context!(App::new(terminal_size, containers, args.debug)).map_err(|err| {
        tui.restore();
        err
    })?;

    arg_context!(app.run(&mut tui).await).map_err(|err| {
        tui.restore();
        err
    })?;

    tui.restore();

    anyhow::Ok(())
}

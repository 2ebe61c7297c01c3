//! staffview - a terminal employee directory
//!
//! Fetches the employee list from a directory service and shows it as a
//! searchable, paginated table.

mod api;
mod app;
mod config;
mod error;
mod events;
mod logging;
mod tasks;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{error, info, warn};

use crate::api::DirectoryClient;
use crate::app::App;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::events::EventHandler;
use crate::tasks::create_task_channel;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Browse the employee directory from the terminal.
#[derive(Debug, Parser)]
#[command(name = "staffview", version, about)]
struct Cli {
    /// Base URL of the directory service, overriding the config file.
    #[arg(long)]
    url: Option<String>,

    /// Path to a config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let config = match &cli.url {
        Some(url) => config.with_base_url(url.as_str()),
        None => config,
    };
    config.validate()?;
    Ok(config)
}

fn init_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
    if let Err(e) = terminal.show_cursor() {
        warn!(error = %e, "Failed to show cursor");
    }
}

async fn run(terminal: &mut Tui, app: &mut App, client: &DirectoryClient) -> Result<()> {
    let (mut rx, spawner) = create_task_channel();
    let events = EventHandler::with_tick_rate(app.config().tick_rate_ms);

    while !app.should_quit() {
        terminal.draw(|frame| app.view(frame))?;

        if let Some(generation) = app.take_pending_fetch() {
            let handle = spawner.spawn_fetch_employees(client, generation);
            app.attach_fetch(handle);
        }

        loop {
            match rx.try_recv() {
                Ok(message) => app.handle_api_message(message),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(AppError::terminal("task channel closed"));
                }
            }
        }

        // Blocks for at most one tick, leaving the runtime free for fetches.
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);
    }

    app.shutdown();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let config = load_config(&cli).map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let client = DirectoryClient::from_config(&config).context("invalid directory service URL")?;
    info!(url = %client.employees_url(), "Starting staffview");

    let mut terminal = init_terminal().context("failed to initialize terminal")?;
    let mut app = App::new(config);

    let result = run(&mut terminal, &mut app, &client).await;
    restore_terminal(&mut terminal);

    if let Err(e) = &result {
        error!(error = %e, "Application exited with an error");
    }
    info!("staffview exiting");
    logging::shutdown();

    result.context("application error")
}

mod audio;
mod catalog;
mod config;
mod controller;
mod logging;
mod model;
mod session;
mod view;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use audio::RodioEngine;
use catalog::Catalog;
use config::Config;
use controller::AppController;
use model::{AppModel, Permissions};
use session::{RemoteCommand, SessionHost, TerminalTitle};
use view::AppView;

/// Terminal music player with a floating mini-player
#[derive(Debug, Parser)]
#[command(name = "bubble-player", version, about)]
struct Cli {
    /// Music directory to scan (overrides `library.path` from the config)
    library: Option<PathBuf>,

    /// Path to a config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== bubble-player starting ===");

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(library) = cli.library {
        config.library.path = library;
    }
    tracing::info!(library = %config.library.path.display(), "Configuration ready");

    // Without an output device there is nothing to play; fail before the TUI starts.
    let engine = match RodioEngine::new() {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "Audio engine failed to start");
            eprintln!("bubble-player: {:#}", e);
            drop(_log_guard);
            std::process::exit(1);
        }
    };

    let catalog = Catalog::new(&config.library.path).follow_links(config.library.follow_links);
    let model = AppModel::new(Permissions::from_config(config.permissions));
    let session = SessionHost::start(Box::new(engine), Box::new(TerminalTitle));
    let mut controller = AppController::new(model, session, catalog, &config);

    let (remote_tx, remote_rx) = mpsc::unbounded_channel();
    if let Err(e) = session::spawn_remote_listener(remote_tx) {
        tracing::warn!(error = %e, "Remote commands unavailable");
    }

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut controller, remote_rx).await;

    controller.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
        return Err(err);
    }

    tracing::info!("bubble-player shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut AppController,
    mut remote_rx: mpsc::UnboundedReceiver<RemoteCommand>,
) -> Result<()> {
    let size = terminal.size()?;
    controller.handle_resize(size.width, size.height);
    controller.start();

    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| AppView::render(f, controller.model()))?;

        if controller.should_quit() {
            break;
        }

        let expiry = controller.model().next_expiry().map(tokio::time::Instant::from_std);

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => controller.handle_key_event(key),
                Some(Ok(Event::Mouse(mouse))) => controller.handle_mouse_event(mouse),
                Some(Ok(Event::Resize(width, height))) => controller.handle_resize(width, height),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(command) = remote_rx.recv() => controller.handle_remote_command(command),
            _ = controller.next_tick() => controller.on_progress_tick(),
            _ = async {
                match expiry {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending::<()>().await,
                }
            } => controller.model.auto_clear_expired(Instant::now()),
        }

        controller.poll_engine();
    }

    Ok(())
}

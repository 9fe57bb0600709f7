mod app;
mod backend;
mod config;
mod features;
mod logging;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::backend::client::BackendClient;
use crate::backend::manager::BackendManager;
use crate::config::SettingsStore;
use anyhow::{Context, Result};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;

    if let Some(path) = logging::init(&cfg.logging) {
        tracing::info!("gesturedeck {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        tracing::error!("fatal: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let client = BackendClient::new(&cfg.backend.base_url, cfg.backend.request_timeout())
        .with_context(|| format!("Invalid backend URL {}", cfg.backend.base_url))?;
    let mut backend = BackendManager::new(client, cfg.polling.gesture(), event_tx.clone());

    let mut state = AppState::new(cfg, SettingsStore::new(config::settings_path()));
    state.video_feed_url = backend.video_feed_url();

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("terminal input failed: {}", e);
                    break;
                }
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // The first screen is decided by the session check
    perform(&mut backend, &mut state, Action::CheckAuth);

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            perform(&mut backend, &mut state, action);
        }

        if state.should_quit {
            tracing::info!("shutting down");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    backend.shutdown();
    Ok(())
}

fn perform(backend: &mut BackendManager, state: &mut AppState, action: Action) {
    match action {
        Action::CheckAuth => backend.check_auth(),
        Action::Authenticate {
            request,
            email,
            password,
        } => backend.authenticate(request, email, password),
        Action::Logout => backend.logout(),
        Action::Camera(command) => backend.camera_command(command),
        Action::StartPoll { id, spec } => backend.start_poll(id, spec),
        Action::StopPolls(ids) => backend.stop_polls(&ids),
        Action::StopAllPolls => backend.stop_all_polls(),
        Action::WatchCameraStartup => backend.watch_startup(
            state.config.polling.status(),
            state.config.camera.init_timeout_polls,
        ),
        Action::StopCameraStartupWatch => backend.stop_startup_watch(),
        Action::SyncSettings(update) => backend.sync_settings(update),
        Action::Schedule { delay, event } => backend.schedule(delay, event),
        Action::Quit => {
            state.should_quit = true;
        }
    }
}

//! Terminal front end for Connect Four.

mod app;
mod input;
mod ui;

pub use app::{App, Outcome};
pub use input::{KeyAction, map_key};
pub use ui::{board_lines, moves_line, piece_color};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{Game, GameEvent};
use crate::input::{KeyCommand, KeyEvents};
use crate::registry::{PlayerContext, PlayerKind};
use anyhow::{Context, Result};
use connect_four_rules::State;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// How long one UI iteration waits for a key press.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs an interactive game in the terminal until the user quits.
#[instrument(skip(config))]
pub async fn run_tui(config: GameConfig, player1: PlayerKind, player2: PlayerKind) -> Result<()> {
    // Log to a file so the screen stays clean
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(%player1, %player2, "Starting Connect Four TUI");

    let (key_tx, keys) = KeyEvents::channel();
    let context = PlayerContext::with_keys(config, keys);
    let mut game = Game::new(
        State::initial(),
        player1.build(&context)?,
        player2.build(&context)?,
    )?;
    let events = game.observe();
    let app = App::new(State::initial(), player1.name(), player2.name())
        .with_descriptions(player1.description(), player2.description());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let task = tokio::spawn(async move { game.run().await });
    let res = run_app(&mut terminal, app, events, key_tx, task).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

/// Draw/input loop. Returns when the user quits.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut events: mpsc::UnboundedReceiver<GameEvent>,
    key_tx: mpsc::UnboundedSender<KeyCommand>,
    task: JoinHandle<Result<State, GameError>>,
) -> Result<()> {
    let mut task = Some(task);

    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }

        if task.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(handle) = task.take() {
                match handle.await {
                    Ok(Ok(state)) => info!(moves = %state.notation(), "Game finished"),
                    Ok(Err(err)) => {
                        warn!(error = %err, "Game stopped with an error");
                        app.fail(err.to_string());
                    }
                    Err(err) => {
                        error!(error = %err, "Game task failed");
                        app.fail(err.to_string());
                    }
                }
                // Anything sent between the last drain and completion
                while let Ok(event) = events.try_recv() {
                    app.handle_event(event);
                }
            }
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match map_key(key) {
                KeyAction::Quit => {
                    info!("User quit");
                    if let Some(handle) = task.take() {
                        handle.abort();
                    }
                    return Ok(());
                }
                KeyAction::Command(command) if !app.finished() => {
                    debug!(?command, "Forwarding key");
                    if key_tx.send(command).is_err() {
                        debug!("No human player listening");
                    }
                }
                KeyAction::Command(_) | KeyAction::Ignore => {}
            }
        }
    }
}

//! Connect Four - terminal game and headless tools.

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::cli::{Cli, Command};
use connect_four::{GameConfig, PlayerKind, play_match, tui};
use connect_four_rules::State;
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            player1,
            player2,
            config,
        } => {
            let config = GameConfig::load_or_default(&config)?;
            tui::run_tui(config, player1, player2).await
        }
        Command::Players => {
            initialize_tracing();
            list_players();
            Ok(())
        }
        Command::Show { moves } => {
            initialize_tracing();
            show(&moves)
        }
        Command::Match {
            player1,
            player2,
            games,
            config,
        } => {
            initialize_tracing();
            run_match(&config, player1, player2, games).await
        }
    }
}

fn list_players() {
    println!("Available players:");
    for kind in PlayerKind::all() {
        println!("  {:<6} {}: {}", kind.to_string(), kind.name(), kind.description());
    }
}

#[instrument]
fn show(moves: &str) -> Result<()> {
    let state = State::parse(moves).with_context(|| format!("Cannot replay '{}'", moves))?;
    println!("{}", state);
    println!();

    match (state.gameover(), state.winner()) {
        (true, Some(piece)) => println!("Game over. Winner is: Player {}", piece),
        (true, None) => println!("Game over. Draw"),
        (false, _) => println!(
            "Player {} to move. Valid plays: {:?}",
            state.next_piece(),
            state.valid_plays()
        ),
    }
    Ok(())
}

#[instrument]
async fn run_match(
    config_path: &Path,
    player1: PlayerKind,
    player2: PlayerKind,
    games: u32,
) -> Result<()> {
    let config = GameConfig::load_or_default(config_path)?;
    info!(games, "Starting headless match");

    let tally = play_match(&config, player1, player2, games).await?;

    println!("{} games", tally.games());
    println!("  Player 1 ({}): {} wins", player1.name(), tally.player1_wins());
    println!("  Player 2 ({}): {} wins", player2.name(), tally.player2_wins());
    println!("  Draws: {}", tally.draws());
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

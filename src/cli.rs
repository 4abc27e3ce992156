//! Command-line interface for connect_four.

use crate::registry::PlayerKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Connect Four in the terminal
#[derive(Parser, Debug)]
#[command(name = "connect_four")]
#[command(about = "Connect Four with human, random, heuristic and solver-backed players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Strategy for player 1 (red, moves first)
        #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
        player1: PlayerKind,

        /// Strategy for player 2 (blue)
        #[arg(long, value_enum, default_value_t = PlayerKind::Hugh)]
        player2: PlayerKind,

        /// Path to the TOML config (defaults are used if it does not exist)
        #[arg(short, long, default_value = "connect_four.toml")]
        config: PathBuf,
    },

    /// List the available strategies
    Players,

    /// Replay a move string and print the resulting board
    Show {
        /// Columns 1-7, one digit per move (e.g. 4455)
        moves: String,
    },

    /// Play several games between computer players without a screen
    Match {
        /// Strategy for player 1
        #[arg(long, value_enum)]
        player1: PlayerKind,

        /// Strategy for player 2
        #[arg(long, value_enum)]
        player2: PlayerKind,

        /// Number of games
        #[arg(short = 'n', long, default_value_t = 10)]
        games: u32,

        /// Path to the TOML config (defaults are used if it does not exist)
        #[arg(short, long, default_value = "connect_four.toml")]
        config: PathBuf,
    },
}

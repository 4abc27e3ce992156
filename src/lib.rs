//! Connect Four in the terminal
//!
//! Two pluggable players take turns dropping pieces into a 7x6 board.
//!
//! # Architecture
//!
//! - **Rules**: immutable game state in the `connect_four_rules` crate
//! - **Players**: keyboard, random, heuristic and remote-solver strategies
//! - **Game**: turn loop relaying each player's thinking to an observer
//! - **TUI**: ratatui front end driven by game events
//!
//! # Example
//!
//! ```no_run
//! use connect_four::{Game, GameConfig, PlayerContext, PlayerKind};
//! use connect_four_rules::State;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let context = PlayerContext::headless(GameConfig::default());
//! let mut game = Game::new(
//!     State::initial(),
//!     PlayerKind::Hugh.build(&context)?,
//!     PlayerKind::Rando.build(&context)?,
//! )?;
//! let last = game.run().await?;
//! println!("{}", last);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod error;
mod game;
mod headless;
mod input;
pub mod players;
mod registry;
pub mod solver;
pub mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Orchestration
pub use game::{Game, GameEvent};
pub use headless::{MatchTally, play_match};

// Crate-level exports - Input
pub use input::{KeyCommand, KeyEvents};

// Crate-level exports - Players
pub use players::{
    HeuristicPlayer, HumanPlayer, Player, RandomPlayer, Reporter, Signal, SignalKind,
    SolverPlayer, check_playable,
};
pub use registry::{PlayerContext, PlayerKind};
pub use solver::{SolverClient, SolverError};

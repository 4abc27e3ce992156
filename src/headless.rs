//! Games between computer players without a screen.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;
use crate::registry::{PlayerContext, PlayerKind};
use connect_four_rules::{Piece, State};
use derive_getters::Getters;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, instrument};

/// Results of a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize)]
pub struct MatchTally {
    player1_wins: u32,
    player2_wins: u32,
    draws: u32,
}

impl MatchTally {
    /// Counts one finished game.
    pub fn record(&mut self, winner: Option<Piece>) {
        match winner {
            Some(Piece::One) => self.player1_wins += 1,
            Some(Piece::Two) => self.player2_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Games counted so far.
    pub fn games(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.draws
    }
}

/// Plays `games` games from the empty board with no thinking delay.
///
/// Player 1 always moves first. Fresh players are built for every game.
///
/// # Errors
///
/// Fails if a player cannot be built (a human has no keyboard here) or a
/// game stops with an error.
#[instrument(skip(config))]
pub async fn play_match(
    config: &GameConfig,
    player1: PlayerKind,
    player2: PlayerKind,
    games: u32,
) -> Result<MatchTally, GameError> {
    let context = PlayerContext::headless(config.clone().with_think_delay(Duration::ZERO));
    let mut tally = MatchTally::default();

    for round in 1..=games {
        let mut game = Game::new(
            State::initial(),
            player1.build(&context)?,
            player2.build(&context)?,
        )?;
        let last = game.run().await?;
        info!(round, moves = %last.notation(), winner = ?last.winner(), "Game finished");
        tally.record(last.winner());
    }

    info!(?tally, "Match finished");
    Ok(tally)
}

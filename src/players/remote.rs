//! Player that asks the remote solver for the best move.

use super::{Player, RandomPlayer, Reporter, check_playable};
use crate::error::GameError;
use crate::solver::{SolverClient, SolverError};
use connect_four_rules::State;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Display name.
pub const NAME: &str = "Eddie";

/// Description shown in the player list.
pub const DESCRIPTION: &str = "Asks an online solver for the best move";

/// Plays the solver's top-scored column, or a random one when the solver
/// cannot be reached.
#[derive(Debug)]
pub struct SolverPlayer {
    client: SolverClient,
    fallback: RandomPlayer,
    think_delay: Duration,
}

impl SolverPlayer {
    /// Creates a solver-backed player.
    pub fn new(client: SolverClient, think_delay: Duration) -> Self {
        Self {
            client,
            fallback: RandomPlayer::new(think_delay),
            think_delay,
        }
    }

    /// Same as [`SolverPlayer::new`] with a seeded fallback.
    pub fn seeded(client: SolverClient, seed: u64, think_delay: Duration) -> Self {
        Self {
            client,
            fallback: RandomPlayer::seeded(seed, think_delay),
            think_delay,
        }
    }

    async fn ask_solver(
        &self,
        state: &State,
        valid: &[usize],
        reporter: &Reporter,
    ) -> Result<usize, SolverError> {
        reporter.thinking("Phoning a friend...");
        let scores = self.client.solve(&state.notation()).await?;

        reporter.thinking("Choosing the best move...");
        reporter.highlight(valid.to_vec());
        best_column(valid, &scores)
            .ok_or_else(|| SolverError::new("No score for any valid column".to_string()))
    }
}

/// Valid column with the highest score; the first one wins ties.
fn best_column(valid: &[usize], scores: &[i32]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for &column in valid {
        let Some(&score) = scores.get(column - 1) else {
            continue;
        };
        if best.is_none_or(|(_, max)| score > max) {
            best = Some((column, score));
        }
    }
    best.map(|(column, _)| column)
}

#[async_trait::async_trait]
impl Player for SolverPlayer {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    #[instrument(skip_all, fields(player = NAME, moves = %state.notation()))]
    async fn get_play(&mut self, state: &State, reporter: Reporter) -> Result<usize, GameError> {
        let valid = check_playable(state)?;

        match self.ask_solver(state, &valid, &reporter).await {
            Ok(column) => {
                tokio::time::sleep(self.think_delay).await;
                debug!(column, "Solver pick");
                reporter.thinking(format!("Chose position {}.", column));
                reporter.highlight(vec![column]);
                Ok(column)
            }
            Err(err) => {
                warn!(error = %err, "Solver unavailable, falling back to random");
                reporter.thinking(format!("The solver didn't help: {}", err.message));
                self.fallback.get_play(state, reporter).await
            }
        }
    }
}

//! Player trait and implementations.

pub mod heuristic;
pub mod human;
pub mod random;
pub mod remote;
mod reporter;

pub use heuristic::{HeuristicPlayer, safe_plays, score_play, winning_plays};
pub use human::HumanPlayer;
pub use random::RandomPlayer;
pub use remote::SolverPlayer;
pub use reporter::{Reporter, Signal, SignalKind};

use crate::error::GameError;
use connect_four_rules::{RulesError, State};

/// A decision policy that picks columns.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Display name.
    fn name(&self) -> &str;

    /// One-line description of the policy.
    fn description(&self) -> &str;

    /// Chooses the next column (1-based) for `state`.
    ///
    /// The returned column is always one of `state.valid_plays()`. Thinking
    /// and highlight notes go to `reporter` and are purely advisory.
    ///
    /// # Errors
    ///
    /// Fails with a precondition error if `state` is over or has no valid
    /// plays.
    async fn get_play(&mut self, state: &State, reporter: Reporter) -> Result<usize, GameError>;
}

/// Checks that a player may be asked for a move and returns the valid plays.
///
/// # Errors
///
/// Returns [`RulesError::Precondition`] if the game is over or no column is
/// playable.
pub fn check_playable(state: &State) -> Result<Vec<usize>, GameError> {
    if state.gameover() {
        return Err(RulesError::precondition("the game is already over").into());
    }
    let plays = state.valid_plays();
    if plays.is_empty() {
        return Err(RulesError::precondition("no column is playable").into());
    }
    Ok(plays)
}

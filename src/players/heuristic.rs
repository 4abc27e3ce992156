//! Player that follows a few simple heuristics.
//!
//! 1. Play a winning column if there is one.
//! 2. Avoid columns that let the opponent win on the next move.
//! 3. Among the safe columns, prefer the one with the best neighbours.
//! 4. If nothing is safe, play anything valid.

use super::{Player, RandomPlayer, Reporter, check_playable};
use crate::error::GameError;
use connect_four_rules::{RulesError, Square, State};
use std::time::Duration;
use tracing::{debug, instrument};

/// Display name.
pub const NAME: &str = "Hugh";

/// Description shown in the player list.
pub const DESCRIPTION: &str = "Plays with simple heuristics";

/// Neighbours of a landing cell, clockwise from up-right. Straight up is
/// omitted: nothing can be there yet.
const NEIGHBOURS: [(isize, isize); 7] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Columns that win immediately for the side to move.
///
/// A finished game has none.
pub fn winning_plays(state: &State) -> Vec<usize> {
    if state.gameover() {
        return Vec::new();
    }
    state
        .valid_plays()
        .into_iter()
        .filter(|&column| {
            state
                .play(column)
                .map(|next| next.winner().is_some())
                .unwrap_or(false)
        })
        .collect()
}

/// Columns after which the opponent has no immediate win.
pub fn safe_plays(state: &State) -> Vec<usize> {
    state
        .valid_plays()
        .into_iter()
        .filter(|&column| {
            state
                .play(column)
                .map(|next| winning_plays(&next).is_empty())
                .unwrap_or(false)
        })
        .collect()
}

/// Rough score of dropping the next piece into `column`.
///
/// Looks only at the neighbouring cells of the landing spot:
/// - own pieces are worth two,
/// - empty cells and the floor are worth one,
/// - walls, the ceiling and opposing pieces are worth zero.
///
/// # Errors
///
/// Fails with a precondition error if `column` is not a valid play.
pub fn score_play(state: &State, column: usize) -> Result<u32, GameError> {
    if !state.valid_play(column)? {
        return Err(RulesError::precondition(format!("column {} is not playable", column)).into());
    }

    let board = state.board();
    let c = column as isize - 1;
    let r = board.height(column - 1) as isize;
    let own = Square::Occupied(state.next_piece());

    let score = NEIGHBOURS
        .iter()
        .map(|&(dc, dr)| {
            let (nc, nr) = (c + dc, r + dr);
            match board.at(nc, nr) {
                Some(square) if square == own => 2,
                Some(Square::Empty) => 1,
                Some(Square::Occupied(_)) => 0,
                // Off the board: only the floor counts, and only when the
                // column itself is on the board.
                None if nr < 0 && board.at(nc, 0).is_some() => 1,
                None => 0,
            }
        })
        .sum();
    Ok(score)
}

/// Heuristic player.
#[derive(Debug)]
pub struct HeuristicPlayer {
    think_delay: Duration,
    picker: RandomPlayer,
}

impl HeuristicPlayer {
    /// Creates a heuristic player with OS-seeded tie breaking.
    pub fn new(think_delay: Duration) -> Self {
        Self {
            think_delay,
            picker: RandomPlayer::new(Duration::ZERO),
        }
    }

    /// Creates a heuristic player with deterministic tie breaking.
    pub fn seeded(seed: u64, think_delay: Duration) -> Self {
        Self {
            think_delay,
            picker: RandomPlayer::seeded(seed, Duration::ZERO),
        }
    }

    /// Safe columns sharing the best neighbour score, and that score.
    fn best_plays(state: &State, safe: &[usize]) -> Result<(Vec<usize>, u32), GameError> {
        let mut best = Vec::new();
        let mut max = 0;
        for &column in safe {
            let score = score_play(state, column)?;
            if best.is_empty() || score > max {
                best = vec![column];
                max = score;
            } else if score == max {
                best.push(column);
            }
        }
        Ok((best, max))
    }
}

#[async_trait::async_trait]
impl Player for HeuristicPlayer {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    #[instrument(skip_all, fields(player = NAME, moves = %state.notation()))]
    async fn get_play(&mut self, state: &State, reporter: Reporter) -> Result<usize, GameError> {
        let valid = check_playable(state)?;
        reporter.highlight(valid.clone());

        let winning = winning_plays(state);
        reporter.thinking(format!("Can I play a winning piece? {:?}", winning));
        if !winning.is_empty() {
            reporter.highlight(winning.clone());
            reporter.thinking("Found one! (or more)");
            tokio::time::sleep(self.think_delay).await;
            let column = self.picker.choose(&winning)?;
            debug!(column, "Playing a winning column");
            return Ok(column);
        }
        reporter.highlight(Vec::new());
        reporter.thinking("No.");

        reporter.highlight(valid.clone());
        let safe = safe_plays(state);
        reporter.thinking(format!(
            "Which places won't give the opponent a win? {:?}",
            safe
        ));
        reporter.highlight(safe.clone());
        if safe.is_empty() {
            reporter.thinking("Uh oh. Only losing moves remain...");
            tokio::time::sleep(self.think_delay).await;
            let column = self.picker.choose(&valid)?;
            debug!(column, "No safe column, playing anything");
            return Ok(column);
        }

        reporter.thinking("Thinking about which safe place is best");
        let (best, max) = Self::best_plays(state, &safe)?;
        reporter.thinking(format!("{:?}", best));
        reporter.thinking(format!(
            "Found {} plays with a max score of {}",
            best.len(),
            max
        ));
        reporter.highlight(best.clone());
        tokio::time::sleep(self.think_delay).await;

        let column = self.picker.choose(&best)?;
        debug!(column, score = max, "Playing best safe column");
        Ok(column)
    }
}

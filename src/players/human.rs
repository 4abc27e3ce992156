//! Player driven by keyboard input.

use super::{Player, Reporter, check_playable};
use crate::error::GameError;
use crate::input::{KeyCommand, KeyEvents};
use connect_four_rules::{State, WIDTH};
use tracing::{debug, instrument, warn};

/// Display name.
pub const NAME: &str = "Human";

/// Description shown in the player list.
pub const DESCRIPTION: &str = "Human player - uses keyboard input";

/// Moves a cursor over the columns and drops a piece on confirm.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    keys: KeyEvents,
}

impl HumanPlayer {
    /// Creates a human player reading from `keys`.
    pub fn new(keys: KeyEvents) -> Self {
        Self { keys }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    #[instrument(skip_all, fields(player = NAME, moves = %state.notation()))]
    async fn get_play(&mut self, state: &State, reporter: Reporter) -> Result<usize, GameError> {
        let valid = check_playable(state)?;
        let mut rx = self.keys.lock().await;

        // Keys pressed while the other side was thinking don't count.
        let mut stale = 0;
        while rx.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            debug!(stale, "Discarded queued key presses");
        }

        let mut cursor = valid[0];
        reporter.highlight(vec![cursor]);
        reporter.thinking("Use LEFT/RIGHT to choose position, and ENTER to confirm");

        loop {
            let Some(command) = rx.recv().await else {
                warn!("Key input closed mid-turn");
                return Err(GameError::InputClosed);
            };

            match command {
                KeyCommand::MoveLeft => cursor = cursor.saturating_sub(1).max(1),
                KeyCommand::MoveRight => cursor = (cursor + 1).min(WIDTH),
                KeyCommand::Select(column) if (1..=WIDTH).contains(&column) => cursor = column,
                KeyCommand::Select(column) => {
                    debug!(column, "Ignoring selection outside the board");
                    continue;
                }
                KeyCommand::Confirm => {
                    if state.valid_play(cursor)? {
                        reporter.thinking(format!("Chosen position {}.", cursor));
                        return Ok(cursor);
                    }
                    reporter.thinking(format!("Column {} is full, choose another", cursor));
                    continue;
                }
            }
            reporter.highlight(vec![cursor]);
        }
    }
}

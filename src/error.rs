//! Application error types.

use crate::registry::PlayerKind;
use connect_four_rules::RulesError;

/// Error raised while running a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// A rule of the game was broken.
    #[display("{_0}")]
    Rules(RulesError),

    /// The key-event source was closed while a human was choosing.
    #[display("Input closed before a column was chosen")]
    InputClosed,

    /// The registry could not construct a strategy.
    #[display("Cannot create player {kind}: {reason}")]
    PlayerUnavailable {
        /// The requested strategy.
        kind: PlayerKind,
        /// Why it could not be built.
        reason: String,
    },
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Rules(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RulesError> for GameError {
    fn from(err: RulesError) -> Self {
        Self::Rules(err)
    }
}

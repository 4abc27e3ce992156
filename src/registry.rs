//! Static registry of the available player strategies.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::KeyEvents;
use crate::players::{self, HeuristicPlayer, HumanPlayer, Player, RandomPlayer, SolverPlayer};
use crate::solver::SolverClient;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

/// Strategy identifiers accepted on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Keyboard-driven.
    Human,
    /// Uniformly random.
    Rando,
    /// Simple heuristics.
    Hugh,
    /// Remote solver with random fallback.
    Eddie,
}

/// Everything a strategy may need at construction.
#[derive(Debug, Clone, Default)]
pub struct PlayerContext {
    /// Shared settings.
    pub config: GameConfig,
    /// Key-event source for human players.
    pub keys: Option<KeyEvents>,
}

impl PlayerContext {
    /// Context without keyboard input.
    pub fn headless(config: GameConfig) -> Self {
        Self { config, keys: None }
    }

    /// Context with a shared key-event source.
    pub fn with_keys(config: GameConfig, keys: KeyEvents) -> Self {
        Self {
            config,
            keys: Some(keys),
        }
    }
}

impl PlayerKind {
    /// Every registered kind, in menu order.
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Display name of the strategy.
    pub fn name(self) -> &'static str {
        match self {
            Self::Human => players::human::NAME,
            Self::Rando => players::random::NAME,
            Self::Hugh => players::heuristic::NAME,
            Self::Eddie => players::remote::NAME,
        }
    }

    /// One-line description of the strategy.
    pub fn description(self) -> &'static str {
        match self {
            Self::Human => players::human::DESCRIPTION,
            Self::Rando => players::random::DESCRIPTION,
            Self::Hugh => players::heuristic::DESCRIPTION,
            Self::Eddie => players::remote::DESCRIPTION,
        }
    }

    /// Whether the strategy reads the keyboard.
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Human)
    }

    /// Constructs a fresh player of this kind.
    ///
    /// # Errors
    ///
    /// Fails with [`GameError::PlayerUnavailable`] when a human is requested
    /// without key events, or the solver client cannot be built.
    #[instrument(skip(context))]
    pub fn build(self, context: &PlayerContext) -> Result<Box<dyn Player>, GameError> {
        let delay = context.config.think_delay();
        let player: Box<dyn Player> = match self {
            Self::Human => {
                let keys = context.keys.clone().ok_or_else(|| GameError::PlayerUnavailable {
                    kind: self,
                    reason: "no keyboard input attached".to_string(),
                })?;
                Box::new(HumanPlayer::new(keys))
            }
            Self::Rando => Box::new(RandomPlayer::new(delay)),
            Self::Hugh => Box::new(HeuristicPlayer::new(delay)),
            Self::Eddie => {
                let client = SolverClient::new(
                    context.config.solver_url().clone(),
                    context.config.solver_timeout(),
                )
                .map_err(|e| GameError::PlayerUnavailable {
                    kind: self,
                    reason: e.message,
                })?;
                Box::new(SolverPlayer::new(client, delay))
            }
        };
        debug!(name = player.name(), "Player built");
        Ok(player)
    }
}

//! Player that picks uniformly among the valid plays.

use super::{Player, Reporter, check_playable};
use crate::error::GameError;
use connect_four_rules::{RulesError, State};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::time::Duration;
use tracing::{debug, instrument};

/// Display name.
pub const NAME: &str = "Rando";

/// Description shown in the player list.
pub const DESCRIPTION: &str = "Just randomly places pieces";

/// Has no idea, just chooses randomly. Never picks an invalid column.
#[derive(Debug)]
pub struct RandomPlayer {
    think_delay: Duration,
    rng: StdRng,
}

impl RandomPlayer {
    /// Creates a random player seeded from the OS.
    pub fn new(think_delay: Duration) -> Self {
        Self {
            think_delay,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a random player with a fixed seed.
    pub fn seeded(seed: u64, think_delay: Duration) -> Self {
        Self {
            think_delay,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks one of `columns` uniformly.
    pub(crate) fn choose(&mut self, columns: &[usize]) -> Result<usize, GameError> {
        columns
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| RulesError::precondition("nothing to choose from").into())
    }
}

#[async_trait::async_trait]
impl Player for RandomPlayer {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    #[instrument(skip_all, fields(player = NAME, moves = %state.notation()))]
    async fn get_play(&mut self, state: &State, reporter: Reporter) -> Result<usize, GameError> {
        let positions = check_playable(state)?;

        reporter.thinking("Considering options...");
        reporter.highlight(positions.clone());
        tokio::time::sleep(self.think_delay).await;

        let position = self.choose(&positions)?;
        reporter.thinking("Choosing one at random...");
        reporter.highlight(vec![position]);
        tokio::time::sleep(self.think_delay).await;

        debug!(position, "Random choice");
        reporter.thinking(format!("Chose position {}.", position));
        Ok(position)
    }
}

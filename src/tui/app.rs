//! View model folded from game events.

use crate::game::GameEvent;
use connect_four_rules::{Piece, State};
use tracing::debug;

/// How the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Someone connected four.
    Winner(Piece),
    /// The board filled up.
    Draw,
}

/// Everything the screen shows.
#[derive(Debug, Clone)]
pub struct App {
    state: State,
    highlight: Vec<usize>,
    thoughts: Vec<String>,
    player1: String,
    player2: String,
    descriptions: [String; 2],
    active: Option<(Piece, String)>,
    outcome: Option<Outcome>,
    error: Option<String>,
}

impl App {
    /// Creates a view of `state` between the named players.
    pub fn new(state: State, player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            state,
            highlight: Vec::new(),
            thoughts: Vec::new(),
            player1: player1.into(),
            player2: player2.into(),
            descriptions: [String::new(), String::new()],
            active: None,
            outcome: None,
            error: None,
        }
    }

    /// Same view with a one-line description under each player's name.
    pub fn with_descriptions(
        mut self,
        player1: impl Into<String>,
        player2: impl Into<String>,
    ) -> Self {
        self.descriptions = [player1.into(), player2.into()];
        self
    }

    /// Board being shown.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Columns the active player is looking at.
    pub fn highlight(&self) -> &[usize] {
        &self.highlight
    }

    /// Commentary of the active player.
    pub fn thoughts(&self) -> &[String] {
        &self.thoughts
    }

    /// Piece and name of the player to move, if a turn is in progress.
    pub fn active(&self) -> Option<(Piece, &str)> {
        self.active.as_ref().map(|(piece, name)| (*piece, name.as_str()))
    }

    /// Name of the player placing `piece`.
    pub fn player_name(&self, piece: Piece) -> &str {
        match piece {
            Piece::One => &self.player1,
            Piece::Two => &self.player2,
        }
    }

    /// Description of the player placing `piece`; empty when none was given.
    pub fn player_description(&self, piece: Piece) -> &str {
        match piece {
            Piece::One => &self.descriptions[0],
            Piece::Two => &self.descriptions[1],
        }
    }

    /// Final result, once known.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Error that stopped the game, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the game has stopped for any reason.
    pub fn finished(&self) -> bool {
        self.outcome.is_some() || self.error.is_some()
    }

    /// Records an error that ended the game early.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.active = None;
    }

    /// Folds one game event into the view.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::TurnStarted { piece, player, .. } => {
                self.highlight.clear();
                self.thoughts.clear();
                self.active = Some((piece, player));
            }
            GameEvent::Highlight(columns) => self.highlight = columns,
            GameEvent::Thinking(text) => self.thoughts.push(text),
            GameEvent::MoveMade { .. } => {
                self.highlight.clear();
            }
            GameEvent::StateChanged(state) => self.state = state,
            GameEvent::GameOver { winner } => {
                self.active = None;
                self.highlight.clear();
                self.outcome = Some(match winner {
                    Some(piece) => Outcome::Winner(piece),
                    None => Outcome::Draw,
                });
            }
        }
    }
}

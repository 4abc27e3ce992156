//! Turn orchestration between two players.

use crate::error::GameError;
use crate::players::{Player, Reporter, Signal, SignalKind};
use connect_four_rules::{Piece, RulesError, State};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace};

/// Notifications sent from the game to its observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A player was asked for a move.
    TurnStarted {
        /// Turn number, starting at 1.
        turn: u64,
        /// Piece the player is placing.
        piece: Piece,
        /// Name of the player.
        player: String,
    },
    /// The active player spotlighted some columns.
    Highlight(Vec<usize>),
    /// The active player reported a reasoning step.
    Thinking(String),
    /// A piece was dropped.
    MoveMade {
        /// Whose piece.
        piece: Piece,
        /// 1-based column.
        column: usize,
    },
    /// The current state was replaced.
    StateChanged(State),
    /// The game finished.
    GameOver {
        /// Winner, or `None` for a draw.
        winner: Option<Piece>,
    },
}

/// Alternates between two players until the state reports game over.
pub struct Game {
    state: State,
    player1: Box<dyn Player>,
    player2: Box<dyn Player>,
    turn: u64,
    highlight: Vec<usize>,
    thoughts: Vec<String>,
    signal_tx: mpsc::UnboundedSender<Signal>,
    signal_rx: mpsc::UnboundedReceiver<Signal>,
    event_tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state.notation())
            .field("player1", &self.player1.name())
            .field("player2", &self.player2.name())
            .field("turn", &self.turn)
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a game continuing from `state`.
    ///
    /// # Errors
    ///
    /// Fails with a precondition error if `state` is already over.
    pub fn new(
        state: State,
        player1: Box<dyn Player>,
        player2: Box<dyn Player>,
    ) -> Result<Self, GameError> {
        if state.gameover() {
            return Err(RulesError::precondition("cannot start a game from a finished state").into());
        }
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Ok(Self {
            state,
            player1,
            player2,
            turn: 0,
            highlight: Vec::new(),
            thoughts: Vec::new(),
            signal_tx,
            signal_rx,
            event_tx: None,
        })
    }

    /// Registers the observer and returns its receiving end.
    ///
    /// A later call replaces the earlier observer.
    pub fn observe(&mut self) -> mpsc::UnboundedReceiver<GameEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.event_tx = Some(tx);
        rx
    }

    /// Current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Columns spotlighted by the active player during this turn.
    pub fn highlight(&self) -> &[usize] {
        &self.highlight
    }

    /// Commentary of the active player during this turn, oldest first.
    pub fn thoughts(&self) -> &[String] {
        &self.thoughts
    }

    /// Number of turns started so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Piece to be placed next.
    pub fn current_piece(&self) -> Piece {
        self.state.next_piece()
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> &dyn Player {
        self.player(self.current_piece())
    }

    /// Player placing `piece`.
    pub fn player(&self, piece: Piece) -> &dyn Player {
        match piece {
            Piece::One => self.player1.as_ref(),
            Piece::Two => self.player2.as_ref(),
        }
    }

    /// Asks the current player for one move and applies it.
    ///
    /// Signals reported during the decision are relayed to the observer as
    /// they arrive. Signals tagged with an earlier turn are dropped.
    ///
    /// # Errors
    ///
    /// Fails with an invalid-operation error if the game is over, and
    /// propagates errors from the player or from applying its column.
    #[instrument(skip(self), fields(moves = %self.state.notation()))]
    pub async fn play_turn(&mut self) -> Result<State, GameError> {
        if self.state.gameover() {
            return Err(RulesError::invalid_operation("the game is already over").into());
        }

        self.turn += 1;
        let turn = self.turn;
        let piece = self.current_piece();
        let name = self.current_player().name().to_string();
        self.highlight.clear();
        self.thoughts.clear();
        info!(turn, %piece, player = %name, "Turn started");
        notify(
            self.event_tx.as_ref(),
            GameEvent::TurnStarted {
                turn,
                piece,
                player: name,
            },
        );

        let reporter = Reporter::new(turn, self.signal_tx.clone());
        let Self {
            state,
            player1,
            player2,
            highlight,
            thoughts,
            signal_rx,
            event_tx,
            ..
        } = self;
        let player = match piece {
            Piece::One => player1,
            Piece::Two => player2,
        };

        let column = {
            let decision = player.get_play(state, reporter);
            tokio::pin!(decision);
            loop {
                tokio::select! {
                    biased;
                    Some(signal) = signal_rx.recv() => {
                        relay(turn, signal, highlight, thoughts, event_tx.as_ref());
                    }
                    result = &mut decision => break result?,
                }
            }
        };
        while let Ok(signal) = signal_rx.try_recv() {
            relay(turn, signal, highlight, thoughts, event_tx.as_ref());
        }

        let next = state.play(column)?;
        debug!(column, %piece, "Move applied");
        highlight.clear();
        thoughts.clear();
        *state = next.clone();

        notify(event_tx.as_ref(), GameEvent::MoveMade { piece, column });
        notify(event_tx.as_ref(), GameEvent::StateChanged(next.clone()));
        Ok(next)
    }

    /// Plays turns until the game is over and returns the final state.
    #[instrument(skip(self), fields(player1 = %self.player1.name(), player2 = %self.player2.name()))]
    pub async fn run(&mut self) -> Result<State, GameError> {
        info!("Starting game");
        while !self.state.gameover() {
            self.play_turn().await?;
        }

        let winner = self.state.winner();
        match winner {
            Some(piece) => info!(%piece, player = %self.player(piece).name(), "Game won"),
            None => info!("Game drawn"),
        }
        notify(self.event_tx.as_ref(), GameEvent::GameOver { winner });
        Ok(self.state.clone())
    }
}

fn notify(events: Option<&mpsc::UnboundedSender<GameEvent>>, event: GameEvent) {
    if let Some(tx) = events {
        if tx.send(event).is_err() {
            trace!("Observer gone, dropping event");
        }
    }
}

fn relay(
    turn: u64,
    signal: Signal,
    highlight: &mut Vec<usize>,
    thoughts: &mut Vec<String>,
    events: Option<&mpsc::UnboundedSender<GameEvent>>,
) {
    if signal.turn != turn {
        debug!(signal_turn = signal.turn, turn, "Dropping stale signal");
        return;
    }
    match signal.kind {
        SignalKind::Thinking(text) => {
            thoughts.push(text.clone());
            notify(events, GameEvent::Thinking(text));
        }
        SignalKind::Highlight(columns) => {
            *highlight = columns.clone();
            notify(events, GameEvent::Highlight(columns));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_filters_by_turn() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut highlight = Vec::new();
        let mut thoughts = Vec::new();

        let stale = Signal {
            turn: 1,
            kind: SignalKind::Thinking("old".to_string()),
        };
        relay(2, stale, &mut highlight, &mut thoughts, Some(&tx));
        assert!(thoughts.is_empty());
        assert!(rx.try_recv().is_err());

        let fresh = Signal {
            turn: 2,
            kind: SignalKind::Highlight(vec![4]),
        };
        relay(2, fresh, &mut highlight, &mut thoughts, Some(&tx));
        assert_eq!(highlight, vec![4]);
        assert_eq!(rx.try_recv().unwrap(), GameEvent::Highlight(vec![4]));
    }

    #[test]
    fn test_notify_without_observer() {
        notify(None, GameEvent::GameOver { winner: None });
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        notify(Some(&tx), GameEvent::GameOver { winner: None });
    }
}

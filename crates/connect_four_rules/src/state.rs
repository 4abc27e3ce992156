//! Immutable Connect Four game state.

use crate::error::RulesError;
use crate::rules::{is_full, wins_at};
use crate::types::{Board, Coord, HEIGHT, Piece, WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// One point-in-time board configuration plus the facts derived from it.
///
/// A `State` is never modified. [`State::play`] returns a brand-new state and
/// leaves its parent valid, so states can be kept around for replay or
/// tree search.
///
/// Serializes as its move notation. Deserializing replays the moves, so a
/// loaded state always went through [`State::play`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct State {
    board: Board,
    moves: Vec<usize>,
    winner: Option<Piece>,
    gameover: bool,
    last_move: Option<Coord>,
}

impl State {
    /// The canonical empty start state.
    pub fn initial() -> Self {
        Self {
            board: Board::new(),
            moves: Vec::new(),
            winner: None,
            gameover: false,
            last_move: None,
        }
    }

    /// Replays a sequence of 1-based columns from the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Replay`] naming the first move that could not
    /// be played.
    #[instrument(skip(columns))]
    pub fn from_moves<I>(columns: I) -> Result<Self, RulesError>
    where
        I: IntoIterator<Item = usize>,
    {
        columns
            .into_iter()
            .enumerate()
            .try_fold(Self::initial(), |state, (i, column)| {
                state.play(column).map_err(|reason| RulesError::Replay {
                    index: i + 1,
                    column,
                    reason: Box::new(reason),
                })
            })
    }

    /// Replays a move string such as `"4453"` from the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidArgument`] for a character that is not a
    /// column digit, or [`RulesError::Replay`] for an illegal move.
    #[instrument]
    pub fn parse(notation: &str) -> Result<Self, RulesError> {
        let columns = notation
            .trim()
            .chars()
            .enumerate()
            .map(|(i, ch)| match ch.to_digit(10) {
                Some(digit) if (1..=WIDTH as u32).contains(&digit) => Ok(digit as usize),
                _ => Err(RulesError::invalid_argument(format!(
                    "character {:?} at position {} is not a column 1..={}",
                    ch,
                    i + 1,
                    WIDTH
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_moves(columns)
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Every move made so far, as 1-based columns in play order.
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// The player who completed a winning run, if any.
    pub fn winner(&self) -> Option<Piece> {
        self.winner
    }

    /// True once there is a winner or the board is full.
    pub fn gameover(&self) -> bool {
        self.gameover
    }

    /// Coordinate of the most recently placed piece.
    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    /// The canonical move notation: one digit per move, in play order.
    pub fn notation(&self) -> String {
        self.moves.iter().map(|column| column.to_string()).collect()
    }

    /// Reports whether a piece can be dropped into `column` (1-based).
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidArgument`] if `column` is outside
    /// `1..=WIDTH`.
    pub fn valid_play(&self, column: usize) -> Result<bool, RulesError> {
        if !(1..=WIDTH).contains(&column) {
            return Err(RulesError::invalid_argument(format!(
                "column {} is outside 1..={}",
                column, WIDTH
            )));
        }
        Ok(self.board.height(column - 1) < HEIGHT)
    }

    /// All playable columns, ascending.
    pub fn valid_plays(&self) -> Vec<usize> {
        (1..=WIDTH)
            .filter(|&column| self.board.height(column - 1) < HEIGHT)
            .collect()
    }

    /// The piece that moves next. Player 1 always moves first.
    pub fn next_piece(&self) -> Piece {
        if self.moves.len() % 2 == 0 {
            Piece::One
        } else {
            Piece::Two
        }
    }

    /// Drops the next piece into `column` (1-based) and returns the new state.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidOperation`] if the game is over, or the
    /// column is out of range or full.
    #[instrument(skip(self), fields(moves = %self.notation()))]
    pub fn play(&self, column: usize) -> Result<Self, RulesError> {
        if self.gameover {
            return Err(RulesError::invalid_operation(format!(
                "cannot play column {}: the game is over",
                column
            )));
        }
        match self.valid_play(column) {
            Ok(true) => {}
            Ok(false) => {
                return Err(RulesError::invalid_operation(format!(
                    "column {} is full",
                    column
                )));
            }
            Err(err) => return Err(RulesError::invalid_operation(err.to_string())),
        }

        let piece = self.next_piece();
        let (board, at) = self.board.with_piece(column - 1, piece);

        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(column);

        let winner = wins_at(&board, at).then_some(piece);
        let gameover = winner.is_some() || is_full(&board);
        if gameover {
            debug!(?winner, "Game over");
        }

        Ok(Self {
            board,
            moves,
            winner,
            gameover,
            last_move: Some(at),
        })
    }
}

impl Default for State {
    fn default() -> Self {
        Self::initial()
    }
}

impl FromStr for State {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for State {
    type Error = RulesError;

    fn try_from(notation: String) -> Result<Self, Self::Error> {
        Self::parse(&notation)
    }
}

impl From<State> for String {
    fn from(state: State) -> Self {
        state.notation()
    }
}

/// Plain-text diagnostic form: the move notation, then the rows top first.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())?;
        for row in (0..HEIGHT).rev() {
            writeln!(f)?;
            for column in 0..WIDTH {
                write!(f, "{}", self.board.get(column, row).symbol())?;
            }
        }
        Ok(())
    }
}

//! Draw detection for Connect Four.

use crate::types::{Board, HEIGHT, WIDTH};
use tracing::instrument;

/// Checks if every cell of the board holds a piece.
///
/// A full board with no winner is a draw.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.pieces() == WIDTH * HEIGHT
}

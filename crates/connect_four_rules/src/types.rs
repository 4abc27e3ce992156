//! Core domain types for Connect Four.

use serde::{Deserialize, Serialize};

/// Number of columns on the board.
pub const WIDTH: usize = 7;

/// Number of rows on the board.
pub const HEIGHT: usize = 6;

/// Length of the run that wins the game.
pub const WIN_LENGTH: usize = 4;

/// Identity of a placed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Piece {
    /// Player 1 (always moves first).
    #[display("1")]
    One,
    /// Player 2.
    #[display("2")]
    Two,
}

impl Piece {
    /// Returns the opposing piece.
    pub fn opponent(self) -> Self {
        match self {
            Piece::One => Piece::Two,
            Piece::Two => Piece::One,
        }
    }

    /// Player number (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Piece::One => 1,
            Piece::Two => 2,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// No piece here.
    #[default]
    Empty,
    /// Cell holds a piece.
    Occupied(Piece),
}

impl Square {
    /// Text symbol used by the diagnostic rendering.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Piece::One) => '1',
            Square::Occupied(Piece::Two) => '2',
        }
    }
}

/// Zero-based board coordinate. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column index, `0..WIDTH`.
    pub column: usize,
    /// Row index, `0..HEIGHT`, counted from the bottom.
    pub row: usize,
}

/// Fixed 7x6 board stored column by column, bottom to top.
///
/// Boards are plain values: a new board is produced for every move and the
/// previous one is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    cells: [[Square; HEIGHT]; WIDTH],
    heights: [usize; WIDTH],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Square::Empty; HEIGHT]; WIDTH],
            heights: [0; WIDTH],
        }
    }

    /// Number of pieces in the column (0-based index).
    ///
    /// Out-of-range columns report a full column.
    pub fn height(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(HEIGHT)
    }

    /// Square at the coordinate; anything off the board reads as empty.
    pub fn get(&self, column: usize, row: usize) -> Square {
        self.cells
            .get(column)
            .and_then(|col| col.get(row))
            .copied()
            .unwrap_or_default()
    }

    /// Square at a signed coordinate, `None` when off the board.
    pub fn at(&self, column: isize, row: isize) -> Option<Square> {
        if column < 0 || row < 0 {
            return None;
        }
        self.cells
            .get(column as usize)
            .and_then(|col| col.get(row as usize))
            .copied()
    }

    /// The filled part of a column, bottom to top.
    pub fn column(&self, column: usize) -> &[Square] {
        match self.cells.get(column) {
            Some(cells) => cells.get(..self.height(column)).unwrap_or(&[]),
            None => &[],
        }
    }

    /// Total number of pieces on the board.
    pub fn pieces(&self) -> usize {
        self.heights.iter().sum()
    }

    /// Returns a copy of this board with `piece` stacked on `column`.
    ///
    /// The caller guarantees the column exists and is not full.
    pub(crate) fn with_piece(&self, column: usize, piece: Piece) -> (Self, Coord) {
        let mut next = *self;
        let row = next.heights[column];
        next.cells[column][row] = Square::Occupied(piece);
        next.heights[column] += 1;
        (next, Coord { column, row })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.pieces(), 0);
        for column in 0..WIDTH {
            assert_eq!(board.height(column), 0);
            assert!(board.column(column).is_empty());
        }
    }

    #[test]
    fn test_with_piece_stacks_upwards_and_leaves_original() {
        let board = Board::new();
        let (one, at) = board.with_piece(3, Piece::One);
        let (two, at2) = one.with_piece(3, Piece::Two);

        assert_eq!(at, Coord { column: 3, row: 0 });
        assert_eq!(at2, Coord { column: 3, row: 1 });
        assert_eq!(
            two.column(3),
            &[Square::Occupied(Piece::One), Square::Occupied(Piece::Two)]
        );
        assert_eq!(board.pieces(), 0);
        assert_eq!(one.pieces(), 1);
    }

    #[test]
    fn test_off_board_lookups() {
        let board = Board::new();
        assert_eq!(board.at(-1, 0), None);
        assert_eq!(board.at(0, -1), None);
        assert_eq!(board.at(WIDTH as isize, 0), None);
        assert_eq!(board.at(0, HEIGHT as isize), None);
        assert_eq!(board.at(0, 0), Some(Square::Empty));
        assert_eq!(board.height(WIDTH), HEIGHT);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Piece::One.opponent(), Piece::Two);
        assert_eq!(Piece::Two.opponent(), Piece::One);
    }
}

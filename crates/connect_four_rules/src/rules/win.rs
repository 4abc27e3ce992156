//! Win detection for Connect Four.
//!
//! Only the lines through the most recently placed piece are examined:
//! every earlier placement was already checked when it was made.

use crate::types::{Board, Coord, HEIGHT, Square, WIDTH, WIN_LENGTH};
use tracing::instrument;

/// Direction steps (column, row) for the four axes.
const AXES: [(isize, isize); 4] = [
    // Vertical
    (0, 1),
    // Horizontal
    (1, 0),
    // Forward diagonal, '/'
    (1, 1),
    // Backward diagonal, '\'
    (1, -1),
];

/// Checks whether the piece at `at` completes a winning run.
///
/// Returns `false` for an empty cell.
#[instrument(skip(board))]
pub fn wins_at(board: &Board, at: Coord) -> bool {
    let target = board.get(at.column, at.row);
    if target == Square::Empty {
        return false;
    }

    AXES.iter()
        .any(|&step| has_run(&line_through(board, at, step), target))
}

/// Collects the maximal line of cells through `at` along `step`,
/// bounded by the edges of the board.
pub fn line_through(board: &Board, at: Coord, (dc, dr): (isize, isize)) -> Vec<Square> {
    let (mut c, mut r) = (at.column as isize, at.row as isize);

    // Walk back to the edge.
    while in_bounds(c - dc, r - dr) {
        c -= dc;
        r -= dr;
    }

    let mut line = Vec::with_capacity(WIDTH.max(HEIGHT));
    while let Some(square) = board.at(c, r) {
        line.push(square);
        c += dc;
        r += dr;
    }
    line
}

fn in_bounds(column: isize, row: isize) -> bool {
    (0..WIDTH as isize).contains(&column) && (0..HEIGHT as isize).contains(&row)
}

fn has_run(line: &[Square], target: Square) -> bool {
    line.windows(WIN_LENGTH)
        .any(|window| window.iter().all(|&square| square == target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, State};

    fn last(state: &State) -> Coord {
        state.last_move().expect("at least one move")
    }

    #[test]
    fn test_vertical_win() {
        let state = State::parse("436767656").unwrap();
        assert_eq!(last(&state), Coord { column: 5, row: 3 });
        assert!(wins_at(state.board(), last(&state)));
        assert_eq!(state.winner(), Some(Piece::One));
    }

    #[test]
    fn test_horizontal_win() {
        let state = State::parse("4152637").unwrap();
        assert_eq!(last(&state), Coord { column: 6, row: 0 });
        assert!(wins_at(state.board(), last(&state)));
    }

    #[test]
    fn test_forward_diagonal_win() {
        let state = State::parse("466653557674").unwrap();
        assert_eq!(last(&state), Coord { column: 3, row: 1 });
        assert!(wins_at(state.board(), last(&state)));
        assert_eq!(state.winner(), Some(Piece::Two));
    }

    #[test]
    fn test_backward_diagonal_win() {
        let state = State::parse("345436344365").unwrap();
        assert_eq!(last(&state), Coord { column: 4, row: 1 });
        assert!(wins_at(state.board(), last(&state)));
        assert_eq!(state.winner(), Some(Piece::Two));
    }

    #[test]
    fn test_no_win_anywhere_on_busy_boards() {
        for notation in [
            "244444666666777777333555555",
            "123456723456776543271165432112345676725431",
        ] {
            let state = State::parse(notation).unwrap();
            for column in 0..WIDTH {
                for row in 0..state.board().height(column) {
                    assert!(
                        !wins_at(state.board(), Coord { column, row }),
                        "{notation}: unexpected win through ({column}, {row})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_cell_never_wins() {
        assert!(!wins_at(&Board::new(), Coord { column: 0, row: 0 }));
    }

    #[test]
    fn test_line_through_is_bounded_by_edges() {
        let board = Board::new();
        let corner = Coord { column: 0, row: 0 };
        assert_eq!(line_through(&board, corner, (0, 1)).len(), HEIGHT);
        assert_eq!(line_through(&board, corner, (1, 0)).len(), WIDTH);
        assert_eq!(line_through(&board, corner, (1, 1)).len(), HEIGHT);
        assert_eq!(line_through(&board, corner, (1, -1)).len(), 1);
    }
}

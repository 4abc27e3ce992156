//! Connect Four rules.
//!
//! Pure game logic with no I/O: the immutable [`State`] value, win and draw
//! detection, and the digit move notation used for replay and for talking
//! to external solvers.
//!
//! # Example
//!
//! ```
//! use connect_four_rules::{Piece, State};
//!
//! let state = State::parse("4152637").unwrap();
//! assert!(state.gameover());
//! assert_eq!(state.winner(), Some(Piece::One));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod rules;
mod state;
mod types;

pub use error::RulesError;
pub use state::State;
pub use types::{Board, Coord, HEIGHT, Piece, Square, WIDTH, WIN_LENGTH};

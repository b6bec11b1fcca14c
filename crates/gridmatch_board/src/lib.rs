//! Pure board logic for generalized tic-tac-toe.
//!
//! A [`Board`] is an N×N grid (N ∈ {3, 4, 5}) of [`CellState`]s. Placing a
//! mark is validated before anything changes, and [`Board::evaluate`]
//! derives the [`Outcome`] from the cells on demand.
//!
//! ```
//! use gridmatch_board::{Board, Outcome, Player};
//!
//! let mut board = Board::new(3)?;
//! for col in 0..3 {
//!     board.place(0, col, Player::Player1)?;
//! }
//! assert_eq!(board.evaluate(), Outcome::Win(Player::Player1));
//! # Ok::<(), gridmatch_board::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
pub mod rules;
mod types;

pub use board::{Board, MAX_SIZE, MIN_SIZE};
pub use error::BoardError;
pub use types::{CellState, Outcome, Player};

//! Game rules for the grid.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! cell storage so the evaluator can be tested against hand-built boards.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, lines, Line};

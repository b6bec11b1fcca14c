//! Full-board detection.
//!
//! A draw is a full board with no winning line; [`Board::evaluate`] checks
//! for a winner before consulting [`is_full`].

use crate::Board;
use tracing::instrument;

/// Checks if every cell holds a mark.
#[instrument(skip(board), fields(size = board.size()))]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| !cell.is_empty())
}

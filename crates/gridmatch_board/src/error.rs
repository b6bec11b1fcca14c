//! Errors raised by board construction and placement.

use crate::board::{MAX_SIZE, MIN_SIZE};

/// Error that can occur when creating a board or placing a mark.
///
/// Every variant is raised before the board is touched, so a rejected call
/// never leaves a partially-mutated board behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// Requested size is outside the supported range.
    #[display("Board size {} is not supported (expected {}..={})", _0, MIN_SIZE, MAX_SIZE)]
    InvalidSize(usize),

    /// Row or column falls outside the grid.
    #[display("Cell ({}, {}) is outside the {}x{} board", row, col, size, size)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Side length of the board.
        size: usize,
    },

    /// Target cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied", row, col)]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
}

impl std::error::Error for BoardError {}

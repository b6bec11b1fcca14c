//! The N×N cell grid.

use crate::error::BoardError;
use crate::rules;
use crate::types::{CellState, Outcome, Player};
use serde::Serialize;
use tracing::{debug, instrument};

/// Smallest supported side length.
pub const MIN_SIZE: usize = 3;

/// Largest supported side length.
pub const MAX_SIZE: usize = 5;

/// Square tic-tac-toe board of side 3, 4 or 5.
///
/// Cells are stored row-major (`row * size + col`). A cell, once marked,
/// is never overwritten; the board is discarded at the end of a round
/// rather than cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<CellState>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidSize`] unless `size` is 3, 4 or 5.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !Self::is_supported_size(size) {
            return Err(BoardError::InvalidSize(size));
        }
        debug!(size, "Creating empty board");
        Ok(Self {
            size,
            cells: vec![CellState::Empty; size * size],
        })
    }

    /// Returns true if a board of this side length can be created.
    pub fn is_supported_size(size: usize) -> bool {
        (MIN_SIZE..=MAX_SIZE).contains(&size)
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.index_of(row, col).ok().map(|idx| self.cells[idx])
    }

    fn index_of(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.size || col >= self.size {
            return Err(BoardError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }

    /// Places `player`'s mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`BoardError::OutOfBounds`] if either index is outside the grid
    /// - [`BoardError::CellOccupied`] if the cell already holds a mark
    ///
    /// The board is unchanged when an error is returned.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), BoardError> {
        let idx = self.index_of(row, col)?;
        if !self.cells[idx].is_empty() {
            return Err(BoardError::CellOccupied { row, col });
        }
        self.cells[idx] = player.mark();
        Ok(())
    }

    /// Computes the current outcome from the cells.
    ///
    /// Pure: calling it repeatedly without an intervening
    /// [`place`](Self::place) yields the same answer.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn evaluate(&self) -> Outcome {
        if let Some(winner) = rules::check_winner(self) {
            Outcome::Win(winner)
        } else if rules::is_full(self) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Coordinates of every empty cell, row by row.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    /// Formats the board as text, one row per line.
    ///
    /// Empty cells render as `_`; marks render with the given symbols.
    pub fn render(&self, cross: &str, nought: &str) -> String {
        self.cells
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellState::Empty => "_",
                        CellState::Cross => cross,
                        CellState::Nought => nought,
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

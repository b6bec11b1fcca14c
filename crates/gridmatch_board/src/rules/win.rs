//! Win detection for boards of any supported size.

use crate::{Board, Player};
use tracing::instrument;

/// A full row, column or diagonal, as row-major cell indices.
pub type Line = Vec<usize>;

/// Enumerates every line of a `size`×`size` grid.
///
/// Rows come first, then columns, then the main diagonal and finally the
/// anti-diagonal, so the first match is deterministic even on boards that
/// hold more than one completed line.
pub fn lines(size: usize) -> impl Iterator<Item = Line> {
    let rows = (0..size).map(move |row| (0..size).map(|col| row * size + col).collect::<Line>());
    let cols = (0..size).map(move |col| (0..size).map(|row| row * size + col).collect::<Line>());
    let diagonal = (0..size).map(|i| i * size + i).collect::<Line>();
    let anti_diagonal = (0..size).map(|i| i * size + (size - 1 - i)).collect::<Line>();

    rows.chain(cols)
        .chain(std::iter::once(diagonal))
        .chain(std::iter::once(anti_diagonal))
}

/// Checks if there is a winner on the board.
///
/// Returns the owner of the first line whose cells all hold the same mark.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board) -> Option<Player> {
    let cells = board.cells();
    lines(board.size()).find_map(|line| {
        let first = cells[line[0]];
        if line.iter().all(|&idx| cells[idx] == first) {
            first.owner()
        } else {
            None
        }
    })
}

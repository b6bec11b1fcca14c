//! Read-only view of a match, emitted after every operation.

use crate::controller::MatchPhase;
use crate::score::Score;
use crate::symbols::PlayerSymbols;
use gridmatch_board::{Board, CellState, Outcome, Player};
use serde::Serialize;

/// Everything a front end needs to render the match.
///
/// Snapshots are owned copies; holding one never blocks the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    /// Current phase.
    pub phase: MatchPhase,
    /// Rounds started so far.
    pub round: u64,
    /// Board of the current or just-finished round.
    pub board: Option<Board>,
    /// Player to move, absent while selecting a board.
    pub current_player: Option<Player>,
    /// Seconds left in the turn.
    pub time_remaining: u32,
    /// Seconds per turn.
    pub turn_limit: u32,
    /// Whether the turn clock is running.
    pub timer_running: bool,
    /// Outcome of the board, absent while selecting.
    pub outcome: Option<Outcome>,
    /// Cumulative score.
    pub score: Score,
    /// Active symbols.
    pub symbols: PlayerSymbols,
}

impl MatchSnapshot {
    /// Cell contents in row-major order, empty while selecting.
    pub fn cells(&self) -> &[CellState] {
        self.board.as_ref().map(Board::cells).unwrap_or_default()
    }

    /// Symbol of the player to move.
    pub fn current_symbol(&self) -> Option<&str> {
        self.current_player
            .map(|player| self.symbols.symbol_for(player))
    }

    /// Board rendered with the active symbols.
    pub fn render_board(&self) -> Option<String> {
        self.board
            .as_ref()
            .map(|board| board.render(self.symbols.player1(), self.symbols.player2()))
    }

    /// One-line status for consoles and logs.
    pub fn status_line(&self) -> String {
        match (self.phase, self.outcome, self.current_player) {
            (MatchPhase::Selecting, _, _) => "Choose a board size (3-5)".to_string(),
            (_, Some(Outcome::Win(player)), _) => {
                format!("{} wins!", self.symbols.symbol_for(player))
            }
            (_, Some(Outcome::Draw), _) => "It's a draw!".to_string(),
            (_, _, Some(player)) => format!(
                "Round {}: {} to move, {}s left",
                self.round,
                self.symbols.symbol_for(player),
                self.time_remaining
            ),
            _ => format!("Round {}", self.round),
        }
    }
}

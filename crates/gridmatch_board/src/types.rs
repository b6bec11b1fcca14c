//! Core domain types for the grid: players, cell contents and outcomes.

use serde::{Deserialize, Serialize};

/// One of the two seats at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// First player (moves first every round, plays crosses).
    Player1,
    /// Second player (plays noughts).
    Player2,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Returns the mark this player places on the board.
    pub fn mark(self) -> CellState {
        match self {
            Player::Player1 => CellState::Cross,
            Player::Player2 => CellState::Nought,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Player1 => write!(f, "Player 1"),
            Player::Player2 => write!(f, "Player 2"),
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Player 1's mark.
    Cross,
    /// Player 2's mark.
    Nought,
}

impl CellState {
    /// Returns the player owning this mark, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            CellState::Empty => None,
            CellState::Cross => Some(Player::Player1),
            CellState::Nought => Some(Player::Player2),
        }
    }

    /// Returns true if no mark has been placed.
    pub fn is_empty(self) -> bool {
        matches!(self, CellState::Empty)
    }
}

/// Result of evaluating a board.
///
/// Always derived from the cells; never stored alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No completed line and at least one empty cell.
    InProgress,
    /// A player completed a line.
    Win(Player),
    /// Board is full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns true once the round can no longer continue.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(*player),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_round_trip_to_owner() {
        for player in [Player::Player1, Player::Player2] {
            assert_eq!(player.mark().owner(), Some(player));
        }
        assert_eq!(CellState::Empty.owner(), None);
    }

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::Player1.opponent(), Player::Player2);
        assert_eq!(Player::Player1.opponent().opponent(), Player::Player1);
    }

    #[test]
    fn test_terminal_outcomes() {
        assert!(!Outcome::InProgress.is_terminal());
        assert!(Outcome::Draw.is_terminal());
        assert!(Outcome::Win(Player::Player2).is_terminal());
        assert_eq!(Outcome::Win(Player::Player2).winner(), Some(Player::Player2));
        assert_eq!(Outcome::Draw.winner(), None);
    }
}

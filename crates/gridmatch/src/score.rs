//! Cumulative match score.

use gridmatch_board::{Outcome, Player};
use serde::{Deserialize, Serialize};

/// Rounds won by each player plus drawn rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    player1_wins: u32,
    player2_wins: u32,
    draws: u32,
}

impl Score {
    /// Creates a score with the given tallies.
    pub fn new(player1_wins: u32, player2_wins: u32, draws: u32) -> Self {
        Self {
            player1_wins,
            player2_wins,
            draws,
        }
    }

    /// Rounds won by [`Player::Player1`].
    pub fn player1_wins(&self) -> u32 {
        self.player1_wins
    }

    /// Rounds won by [`Player::Player2`].
    pub fn player2_wins(&self) -> u32 {
        self.player2_wins
    }

    /// Rounds that ended with a full board and no line.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Rounds won by `player`.
    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::Player1 => self.player1_wins,
            Player::Player2 => self.player2_wins,
        }
    }

    /// Total rounds recorded.
    pub fn rounds_played(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.draws
    }

    /// Records a finished round. `InProgress` is ignored.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Player::Player1) => self.player1_wins += 1,
            Outcome::Win(Player::Player2) => self.player2_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

/// What happens to the score when a new match starts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoreResetPolicy {
    /// Keep accumulating across matches.
    #[default]
    Preserve,
    /// Zero the score whenever a new match starts.
    Reset,
}

//! Match configuration, loadable from TOML.

use crate::error::{ConfigError, MatchError};
use crate::score::ScoreResetPolicy;
use crate::symbols::PlayerSymbols;
use derive_getters::Getters;
use derive_setters::Setters;
use gridmatch_board::Board;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Seconds a player has to move before the turn is forfeited.
pub const TURN_LIMIT: u32 = 10;

/// Settings for a match.
///
/// ```toml
/// size = 4
/// turn_limit = 15
/// score_policy = "reset"
///
/// [symbols]
/// player1 = "X"
/// player2 = "O"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Side length of the board (3 to 5).
    #[serde(default = "default_size")]
    size: usize,

    /// Seconds per turn before auto-forfeit.
    #[serde(default = "default_turn_limit")]
    turn_limit: u32,

    /// Display symbols for both players.
    #[serde(default)]
    symbols: PlayerSymbols,

    /// Whether starting a new match clears the score.
    #[serde(default)]
    score_policy: ScoreResetPolicy,
}

fn default_size() -> usize {
    3
}

fn default_turn_limit() -> u32 {
    TURN_LIMIT
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            turn_limit: default_turn_limit(),
            symbols: PlayerSymbols::default(),
            score_policy: ScoreResetPolicy::default(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys take their defaults. The result is validated before it
    /// is returned.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(
            size = config.size,
            turn_limit = config.turn_limit,
            score_policy = %config.score_policy,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Checks size, turn limit and symbols.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), MatchError> {
        if !Board::is_supported_size(self.size) {
            return Err(MatchError::InvalidConfiguration(format!(
                "board size {} is not supported",
                self.size
            )));
        }
        if self.turn_limit == 0 {
            return Err(MatchError::InvalidConfiguration(
                "turn limit must be at least one second".to_string(),
            ));
        }
        self.symbols.validate()
    }
}

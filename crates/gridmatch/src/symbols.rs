//! Display symbols for the two players.

use crate::error::MatchError;
use derive_getters::Getters;
use gridmatch_board::Player;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use unicode_segmentation::UnicodeSegmentation;

/// The strings shown for each player's mark.
///
/// Both symbols must be exactly one grapheme cluster and they must differ.
/// Symbols are a presentation mapping only; the board stores
/// [`CellState`](gridmatch_board::CellState) values.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerSymbols {
    /// Symbol for [`Player::Player1`].
    player1: String,
    /// Symbol for [`Player::Player2`].
    player2: String,
}

impl PlayerSymbols {
    /// Creates a validated symbol pair.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] if either symbol is empty,
    /// longer than one grapheme, or both are the same.
    #[instrument(skip(player1, player2))]
    pub fn new(player1: impl Into<String>, player2: impl Into<String>) -> Result<Self, MatchError> {
        let symbols = Self {
            player1: player1.into(),
            player2: player2.into(),
        };
        symbols.validate()?;
        Ok(symbols)
    }

    /// Checks the symbol invariants.
    ///
    /// Deserialized pairs skip [`new`](Self::new), so loaders call this
    /// before trusting them.
    #[instrument(skip(self), fields(player1 = %self.player1, player2 = %self.player2))]
    pub fn validate(&self) -> Result<(), MatchError> {
        for (label, symbol) in [("player 1", &self.player1), ("player 2", &self.player2)] {
            if symbol.graphemes(true).count() != 1 {
                warn!(label, symbol = %symbol, "Rejected symbol");
                return Err(MatchError::InvalidConfiguration(format!(
                    "{} symbol must be a single grapheme, got {:?}",
                    label, symbol
                )));
            }
        }
        if self.player1 == self.player2 {
            warn!(symbol = %self.player1, "Rejected duplicate symbols");
            return Err(MatchError::InvalidConfiguration(format!(
                "both players cannot use {:?}",
                self.player1
            )));
        }
        Ok(())
    }

    /// Returns the symbol for `player`.
    pub fn symbol_for(&self, player: Player) -> &str {
        match player {
            Player::Player1 => &self.player1,
            Player::Player2 => &self.player2,
        }
    }
}

impl Default for PlayerSymbols {
    fn default() -> Self {
        Self {
            player1: "X".to_string(),
            player2: "O".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbols_are_valid() {
        let symbols = PlayerSymbols::default();
        assert!(symbols.validate().is_ok());
        assert_eq!(symbols.symbol_for(Player::Player1), "X");
        assert_eq!(symbols.symbol_for(Player::Player2), "O");
    }

    #[test]
    fn test_duplicate_rejected() {
        assert!(matches!(
            PlayerSymbols::new("X", "X"),
            Err(MatchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(PlayerSymbols::new("", "O").is_err());
        assert!(PlayerSymbols::new("X", "").is_err());
    }

    #[test]
    fn test_multi_character_rejected() {
        assert!(PlayerSymbols::new("XX", "O").is_err());
    }

    #[test]
    fn test_multi_code_point_grapheme_accepted() {
        let symbols = PlayerSymbols::new("👍🏽", "e\u{301}").unwrap();
        assert_eq!(symbols.symbol_for(Player::Player1), "👍🏽");
        assert_eq!(symbols.symbol_for(Player::Player2), "e\u{301}");
        assert!(PlayerSymbols::new("👍🏽👍🏽", "O").is_err());
        assert!(PlayerSymbols::new("e\u{301}", "e\u{301}").is_err());
    }

    #[test]
    fn test_non_ascii_single_character_accepted() {
        let symbols = PlayerSymbols::new("★", "0").unwrap();
        assert_eq!(symbols.player1(), "★");
        assert_eq!(symbols.player2(), "0");
    }
}

//! Error types for the match engine.

use crate::controller::MatchPhase;
use gridmatch_board::BoardError;
use tracing::instrument;

/// Error returned by a rejected match operation.
///
/// Every variant is recoverable: the controller validates before it
/// mutates, so a rejected operation leaves the match exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MatchError {
    /// The board refused the move (bad size, out of bounds or occupied).
    #[display("{}", _0)]
    Board(BoardError),

    /// Size, symbols or turn limit are invalid.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// The operation is not allowed in the current phase.
    #[display("Cannot {} while {}", operation, phase)]
    IllegalStateTransition {
        /// What the caller tried to do.
        operation: &'static str,
        /// Phase the match was in.
        phase: MatchPhase,
    },

    /// The driver task owning the controller has shut down.
    #[display("Match driver is no longer running")]
    Disconnected,
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Board(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl MatchError {
    pub(crate) fn illegal(operation: &'static str, phase: MatchPhase) -> Self {
        MatchError::IllegalStateTransition { operation, phase }
    }
}

/// Configuration file error.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<MatchError> for ConfigError {
    #[track_caller]
    fn from(err: MatchError) -> Self {
        Self::new(err.to_string())
    }
}

//! Gridmatch - timed tic-tac-toe matches on 3×3 to 5×5 boards
//!
//! Two local players alternate on an N×N board. Each turn is limited by a
//! countdown; when it expires the turn passes to the opponent without a
//! move. A cumulative score survives across rounds.
//!
//! # Architecture
//!
//! - **Board**: pure board and rules, re-exported from `gridmatch_board`
//! - **Controller**: synchronous state machine owning the match
//! - **Timer**: cancellable tick task for the running turn
//! - **Driver**: async event loop serializing moves, ticks and lifecycle
//!   requests against the controller
//!
//! # Example
//!
//! ```
//! use gridmatch::{MatchController, Outcome, Player, PlayerSymbols};
//!
//! # fn main() -> Result<(), gridmatch::MatchError> {
//! let mut game = MatchController::default();
//! game.configure(3, PlayerSymbols::default())?;
//! for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
//!     game.submit_move(row, col)?;
//! }
//! assert_eq!(game.outcome(), Some(Outcome::Win(Player::Player1)));
//! assert_eq!(game.score().player1_wins(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod driver;
mod error;
mod score;
mod snapshot;
mod symbols;
mod timer;

// Crate-level exports - Configuration
pub use config::{MatchConfig, TURN_LIMIT};

// Crate-level exports - Match state machine
pub use controller::{MatchController, MatchPhase, TickOutcome, TickToken};

// Crate-level exports - Async driver
pub use driver::{MatchDriver, MatchHandle, MatchRequest};
pub use timer::{TurnTimer, TICK_PERIOD};

// Crate-level exports - Errors
pub use error::{ConfigError, MatchError};

// Crate-level exports - Scoring and presentation
pub use score::{Score, ScoreResetPolicy};
pub use snapshot::MatchSnapshot;
pub use symbols::PlayerSymbols;

// Crate-level exports - Board types
pub use gridmatch_board::{Board, BoardError, CellState, Outcome, Player, MAX_SIZE, MIN_SIZE};

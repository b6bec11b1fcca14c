//! Match controller: turn order, turn clock, rounds and score.
//!
//! The controller is a plain synchronous state machine. It owns every
//! piece of mutable match state; callers drive it with operations and read
//! it back through [`MatchSnapshot`]s. Real-time ticking lives in
//! [`MatchDriver`](crate::MatchDriver), which serializes all operations
//! against one controller.

use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::score::{Score, ScoreResetPolicy};
use crate::snapshot::MatchSnapshot;
use crate::symbols::PlayerSymbols;
use gridmatch_board::{Board, Outcome, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Phase of the match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for a board size to be chosen.
    Selecting,
    /// A round is being played.
    InRound,
    /// The last round reached a win or draw.
    RoundOver,
}

impl std::fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchPhase::Selecting => write!(f, "selecting a board"),
            MatchPhase::InRound => write!(f, "a round is in progress"),
            MatchPhase::RoundOver => write!(f, "the round is over"),
        }
    }
}

/// Identifies the turn a timer tick was scheduled for.
///
/// Tokens never repeat within a controller, so a tick carrying an old
/// token can always be told apart from one for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickToken {
    /// Round the tick belongs to.
    pub round: u64,
    /// Turn within the controller's lifetime.
    pub turn: u64,
}

/// What a tick did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was stopped or the tick was stale; nothing changed.
    Ignored,
    /// One second was taken off the clock.
    Counted {
        /// Seconds left in the turn.
        remaining: u32,
    },
    /// The clock ran out and the turn passed to the other player.
    Forfeited {
        /// Player whose turn was skipped.
        skipped: Player,
        /// Player now to move.
        next: Player,
    },
}

/// Owns board, turn state, symbols and score for one match.
#[derive(Debug, Clone)]
pub struct MatchController {
    phase: MatchPhase,
    board: Option<Board>,
    symbols: PlayerSymbols,
    score: Score,
    score_policy: ScoreResetPolicy,
    turn_limit: u32,
    current_player: Player,
    time_remaining: u32,
    timer_running: bool,
    round: u64,
    turn: u64,
}

impl MatchController {
    /// Creates a controller in the [`MatchPhase::Selecting`] phase.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidConfiguration`] if the config fails
    /// [`MatchConfig::validate`].
    #[instrument(skip(config), fields(turn_limit = config.turn_limit(), policy = %config.score_policy()))]
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;
        info!("Creating match controller");
        Ok(Self::from_config(&config))
    }

    fn from_config(config: &MatchConfig) -> Self {
        Self {
            phase: MatchPhase::Selecting,
            board: None,
            symbols: config.symbols().clone(),
            score: Score::default(),
            score_policy: *config.score_policy(),
            turn_limit: *config.turn_limit(),
            current_player: Player::Player1,
            time_remaining: *config.turn_limit(),
            timer_running: false,
            round: 0,
            turn: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Phase transitions
    // ─────────────────────────────────────────────────────────────

    /// Starts the first round of a match on a `size`×`size` board.
    ///
    /// Only valid while [`MatchPhase::Selecting`]. Both size and symbols are
    /// checked before anything changes.
    #[instrument(skip(self, symbols), fields(phase = ?self.phase))]
    pub fn configure(&mut self, size: usize, symbols: PlayerSymbols) -> Result<(), MatchError> {
        if self.phase != MatchPhase::Selecting {
            warn!("configure rejected outside selection");
            return Err(MatchError::illegal("configure a match", self.phase));
        }
        let board = Board::new(size)
            .map_err(|e| MatchError::InvalidConfiguration(e.to_string()))?;
        symbols.validate()?;

        self.symbols = symbols;
        self.start_round(board);
        info!(size, round = self.round, "Match configured");
        Ok(())
    }

    /// Places the current player's mark at `(row, col)`.
    ///
    /// On a terminal outcome the score is updated, the clock stops and the
    /// match enters [`MatchPhase::RoundOver`]. Otherwise the turn passes
    /// with a full clock.
    ///
    /// # Errors
    ///
    /// - [`MatchError::IllegalStateTransition`] outside a round
    /// - [`MatchError::Board`] for out-of-bounds or occupied cells; the
    ///   move is ignored and the match is unchanged
    #[instrument(skip(self), fields(player = ?self.current_player, phase = ?self.phase))]
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<Outcome, MatchError> {
        let player = self.current_player;
        let board = match (self.phase, self.board.as_mut()) {
            (MatchPhase::InRound, Some(board)) => board,
            _ => {
                warn!("Move submitted outside a round");
                return Err(MatchError::illegal("submit a move", self.phase));
            }
        };

        board.place(row, col, player).map_err(|e| {
            warn!(error = %e, "Move rejected by board");
            MatchError::from(e)
        })?;

        let outcome = board.evaluate();
        self.stop_timer();
        if outcome.is_terminal() {
            self.score.record(outcome);
            self.phase = MatchPhase::RoundOver;
            info!(%outcome, round = self.round, score = ?self.score, "Round finished");
        } else {
            self.begin_turn(player.opponent());
            debug!(next = ?self.current_player, "Turn passed");
        }
        Ok(outcome)
    }

    /// Takes one second off the running clock.
    ///
    /// At zero the stalled player forfeits the turn: the other player moves
    /// next with a full clock. Board and score are never touched. Does
    /// nothing while the clock is stopped.
    #[instrument(skip(self), fields(remaining = self.time_remaining))]
    pub fn tick(&mut self) -> TickOutcome {
        if !self.timer_running || self.phase != MatchPhase::InRound {
            debug!("Tick ignored, timer stopped");
            return TickOutcome::Ignored;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return TickOutcome::Counted {
                remaining: self.time_remaining,
            };
        }

        let skipped = self.current_player;
        self.begin_turn(skipped.opponent());
        info!(?skipped, next = ?self.current_player, "Turn forfeited on timeout");
        TickOutcome::Forfeited {
            skipped,
            next: self.current_player,
        }
    }

    /// Applies a tick only if it was scheduled for the current turn.
    pub fn tick_for(&mut self, token: TickToken) -> TickOutcome {
        if self.tick_token() != Some(token) {
            debug!(?token, current = ?self.tick_token(), "Stale tick dropped");
            return TickOutcome::Ignored;
        }
        self.tick()
    }

    /// Token for the running clock, or `None` while it is stopped.
    pub fn tick_token(&self) -> Option<TickToken> {
        (self.timer_running && self.phase == MatchPhase::InRound).then_some(TickToken {
            round: self.round,
            turn: self.turn,
        })
    }

    /// Starts another round on a fresh board of the same size.
    ///
    /// Only valid in [`MatchPhase::RoundOver`]. The score carries over.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn start_next_round(&mut self) -> Result<(), MatchError> {
        match (self.phase, self.board.as_ref()) {
            (MatchPhase::RoundOver, Some(board)) => {
                let board = Board::new(board.size())?;
                self.start_round(board);
                info!(round = self.round, "Next round started");
                Ok(())
            }
            _ => {
                warn!("Next round requested before the round ended");
                Err(MatchError::illegal("start the next round", self.phase))
            }
        }
    }

    /// Abandons the round in progress and starts over on an empty board.
    ///
    /// Nothing is scored for the abandoned round.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn restart_round(&mut self) -> Result<(), MatchError> {
        match (self.phase, self.board.as_ref()) {
            (MatchPhase::InRound, Some(board)) => {
                let board = Board::new(board.size())?;
                self.start_round(board);
                info!(round = self.round, "Round restarted");
                Ok(())
            }
            _ => {
                warn!("Restart requested outside a round");
                Err(MatchError::illegal("restart the round", self.phase))
            }
        }
    }

    /// Returns to board selection, discarding the board and turn state.
    ///
    /// The score is kept or cleared according to the [`ScoreResetPolicy`].
    #[instrument(skip(self), fields(phase = ?self.phase, policy = %self.score_policy))]
    pub fn start_new_match(&mut self) -> Result<(), MatchError> {
        if self.phase == MatchPhase::Selecting {
            warn!("New match requested while already selecting");
            return Err(MatchError::illegal("start a new match", self.phase));
        }

        self.stop_timer();
        self.board = None;
        self.current_player = Player::Player1;
        self.time_remaining = self.turn_limit;
        self.phase = MatchPhase::Selecting;
        if self.score_policy == ScoreResetPolicy::Reset {
            self.score = Score::default();
        }
        info!(score = ?self.score, "Returned to board selection");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Settings and score
    // ─────────────────────────────────────────────────────────────

    /// Replaces both player symbols.
    ///
    /// Rejected pairs leave the previous symbols in place.
    #[instrument(skip(self, player1, player2))]
    pub fn update_symbols(
        &mut self,
        player1: impl Into<String>,
        player2: impl Into<String>,
    ) -> Result<(), MatchError> {
        self.symbols = PlayerSymbols::new(player1, player2)?;
        info!(player1 = %self.symbols.player1(), player2 = %self.symbols.player2(), "Symbols updated");
        Ok(())
    }

    /// Zeros the cumulative score.
    #[instrument(skip(self))]
    pub fn reset_score(&mut self) {
        self.score = Score::default();
        info!("Score reset");
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Board for the current or just-finished round.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Outcome of the current board, evaluated fresh.
    pub fn outcome(&self) -> Option<Outcome> {
        self.board.as_ref().map(Board::evaluate)
    }

    /// Player to move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Seconds left in the current turn.
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Whether the turn clock is running.
    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// Cumulative score.
    pub fn score(&self) -> Score {
        self.score
    }

    /// Active player symbols.
    pub fn symbols(&self) -> &PlayerSymbols {
        &self.symbols
    }

    /// Seconds per turn.
    pub fn turn_limit(&self) -> u32 {
        self.turn_limit
    }

    /// Number of rounds started so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    /// Immutable view of everything a front end needs to render.
    #[instrument(skip(self), fields(phase = ?self.phase))]
    pub fn snapshot(&self) -> MatchSnapshot {
        let in_play = self.phase != MatchPhase::Selecting;
        MatchSnapshot {
            phase: self.phase,
            round: self.round,
            board: self.board.clone(),
            current_player: in_play.then_some(self.current_player),
            time_remaining: self.time_remaining,
            turn_limit: self.turn_limit,
            timer_running: self.timer_running,
            outcome: self.outcome(),
            score: self.score,
            symbols: self.symbols.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn start_round(&mut self, board: Board) {
        self.board = Some(board);
        self.round += 1;
        self.phase = MatchPhase::InRound;
        self.begin_turn(Player::Player1);
    }

    fn begin_turn(&mut self, player: Player) {
        self.current_player = player;
        self.time_remaining = self.turn_limit;
        self.timer_running = true;
        self.turn += 1;
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
        self.turn += 1;
    }
}

impl Default for MatchController {
    fn default() -> Self {
        Self::from_config(&MatchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridmatch_board::{BoardError, CellState};

    fn in_round(size: usize) -> MatchController {
        let mut controller = MatchController::default();
        controller.configure(size, PlayerSymbols::default()).unwrap();
        controller
    }

    fn play(controller: &mut MatchController, moves: &[(usize, usize)]) -> Outcome {
        let mut outcome = Outcome::InProgress;
        for &(row, col) in moves {
            outcome = controller.submit_move(row, col).unwrap();
        }
        outcome
    }

    const TOP_ROW_WIN: [(usize, usize); 5] = [(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)];
    const DRAW: [(usize, usize); 9] = [
        (0, 0),
        (0, 1),
        (0, 2),
        (1, 1),
        (1, 0),
        (1, 2),
        (2, 1),
        (2, 0),
        (2, 2),
    ];

    #[test]
    fn test_configure_starts_round() {
        for size in 3..=5 {
            let controller = in_round(size);
            assert_eq!(controller.phase(), MatchPhase::InRound);
            assert_eq!(controller.current_player(), Player::Player1);
            assert_eq!(controller.time_remaining(), 10);
            assert!(controller.timer_running());
            let board = controller.board().unwrap();
            assert_eq!(board.cells().len(), size * size);
            assert_eq!(controller.outcome(), Some(Outcome::InProgress));
        }
    }

    #[test]
    fn test_configure_rejects_bad_size_and_symbols() {
        let mut controller = MatchController::default();
        assert!(matches!(
            controller.configure(6, PlayerSymbols::default()),
            Err(MatchError::InvalidConfiguration(_))
        ));

        let duplicate: PlayerSymbols =
            serde_json::from_str(r#"{"player1":"X","player2":"X"}"#).unwrap();
        assert!(matches!(
            controller.configure(3, duplicate),
            Err(MatchError::InvalidConfiguration(_))
        ));
        assert_eq!(controller.phase(), MatchPhase::Selecting);
        assert!(controller.board().is_none());
    }

    #[test]
    fn test_configure_twice_is_illegal() {
        let mut controller = in_round(3);
        assert!(matches!(
            controller.configure(4, PlayerSymbols::default()),
            Err(MatchError::IllegalStateTransition { .. })
        ));
        assert_eq!(controller.board().unwrap().size(), 3);
    }

    #[test]
    fn test_move_passes_turn_and_resets_clock() {
        let mut controller = in_round(3);
        controller.tick();
        controller.tick();
        assert_eq!(controller.time_remaining(), 8);

        let outcome = controller.submit_move(1, 1).unwrap();
        assert_eq!(outcome, Outcome::InProgress);
        assert_eq!(controller.current_player(), Player::Player2);
        assert_eq!(controller.time_remaining(), 10);
        assert!(controller.timer_running());
        assert_eq!(controller.board().unwrap().get(1, 1), Some(CellState::Cross));
    }

    #[test]
    fn test_rejected_move_is_a_no_op() {
        let mut controller = in_round(3);
        controller.submit_move(0, 0).unwrap();
        controller.tick();
        let before = controller.snapshot();

        assert_eq!(
            controller.submit_move(0, 0),
            Err(MatchError::Board(BoardError::CellOccupied { row: 0, col: 0 }))
        );
        assert!(matches!(
            controller.submit_move(3, 3),
            Err(MatchError::Board(BoardError::OutOfBounds { .. }))
        ));
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_top_row_win_scores_once() {
        let mut controller = in_round(3);
        assert_eq!(play(&mut controller, &TOP_ROW_WIN), Outcome::Win(Player::Player1));
        assert_eq!(controller.phase(), MatchPhase::RoundOver);
        assert_eq!(controller.score(), Score::new(1, 0, 0));
        assert!(!controller.timer_running());

        assert!(matches!(
            controller.submit_move(2, 0),
            Err(MatchError::IllegalStateTransition { .. })
        ));
        assert_eq!(controller.tick(), TickOutcome::Ignored);
        assert_eq!(controller.score(), Score::new(1, 0, 0));
        assert_eq!(controller.outcome(), Some(Outcome::Win(Player::Player1)));
    }

    #[test]
    fn test_draw_scores_once() {
        let mut controller = in_round(3);
        assert_eq!(play(&mut controller, &DRAW), Outcome::Draw);
        assert_eq!(controller.score(), Score::new(0, 0, 1));
        assert_eq!(controller.phase(), MatchPhase::RoundOver);
    }

    #[test]
    fn test_tick_counts_down_then_forfeits() {
        let mut controller = in_round(3);
        controller.submit_move(0, 0).unwrap();
        let board_before = controller.board().cloned();

        for expected in (1..10).rev() {
            assert_eq!(controller.tick(), TickOutcome::Counted { remaining: expected });
        }
        assert_eq!(
            controller.tick(),
            TickOutcome::Forfeited {
                skipped: Player::Player2,
                next: Player::Player1
            }
        );
        assert_eq!(controller.current_player(), Player::Player1);
        assert_eq!(controller.time_remaining(), 10);
        assert!(controller.timer_running());
        assert_eq!(controller.board().cloned(), board_before);
        assert_eq!(controller.score(), Score::default());
    }

    #[test]
    fn test_stale_token_ignored() {
        let mut controller = in_round(3);
        let stale = controller.tick_token().unwrap();
        controller.submit_move(2, 2).unwrap();

        assert_eq!(controller.tick_for(stale), TickOutcome::Ignored);
        assert_eq!(controller.time_remaining(), 10);

        let fresh = controller.tick_token().unwrap();
        assert_ne!(fresh, stale);
        assert_eq!(controller.tick_for(fresh), TickOutcome::Counted { remaining: 9 });
    }

    #[test]
    fn test_forfeit_changes_token() {
        let mut controller = in_round(3);
        let token = controller.tick_token().unwrap();
        for _ in 0..10 {
            controller.tick_for(token);
        }
        assert_eq!(controller.current_player(), Player::Player2);
        assert_eq!(controller.tick_for(token), TickOutcome::Ignored);
    }

    #[test]
    fn test_next_round_keeps_score_and_size() {
        let mut controller = in_round(4);
        assert!(matches!(
            controller.start_next_round(),
            Err(MatchError::IllegalStateTransition { .. })
        ));

        play(&mut controller, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2), (0, 3)]);
        assert_eq!(controller.score(), Score::new(1, 0, 0));

        controller.start_next_round().unwrap();
        assert_eq!(controller.phase(), MatchPhase::InRound);
        assert_eq!(controller.round(), 2);
        assert_eq!(controller.current_player(), Player::Player1);
        assert_eq!(controller.board().unwrap().size(), 4);
        assert!(controller.board().unwrap().empty_cells().len() == 16);
        assert_eq!(controller.score(), Score::new(1, 0, 0));
    }

    #[test]
    fn test_restart_round_does_not_score() {
        let mut controller = in_round(3);
        play(&mut controller, &[(0, 0), (1, 1)]);
        controller.restart_round().unwrap();
        assert_eq!(controller.board().unwrap().empty_cells().len(), 9);
        assert_eq!(controller.current_player(), Player::Player1);
        assert_eq!(controller.score(), Score::default());
        assert_eq!(controller.round(), 2);
    }

    #[test]
    fn test_new_match_preserves_score_by_default() {
        let mut controller = in_round(3);
        play(&mut controller, &TOP_ROW_WIN);
        controller.start_new_match().unwrap();

        assert_eq!(controller.phase(), MatchPhase::Selecting);
        assert!(controller.board().is_none());
        assert!(!controller.timer_running());
        assert_eq!(controller.tick_token(), None);
        assert_eq!(controller.score(), Score::new(1, 0, 0));
        assert!(matches!(
            controller.start_new_match(),
            Err(MatchError::IllegalStateTransition { .. })
        ));
    }

    #[test]
    fn test_new_match_reset_policy_clears_score() {
        let config = MatchConfig::default().with_score_policy(ScoreResetPolicy::Reset);
        let mut controller = MatchController::new(config).unwrap();
        controller.configure(3, PlayerSymbols::default()).unwrap();
        play(&mut controller, &TOP_ROW_WIN);
        controller.start_new_match().unwrap();
        assert_eq!(controller.score(), Score::default());
    }

    #[test]
    fn test_new_match_from_in_round() {
        let mut controller = in_round(5);
        controller.submit_move(4, 4).unwrap();
        controller.start_new_match().unwrap();
        controller.configure(3, PlayerSymbols::default()).unwrap();
        assert_eq!(controller.board().unwrap().size(), 3);
        assert_eq!(controller.current_player(), Player::Player1);
    }

    #[test]
    fn test_update_symbols() {
        let mut controller = in_round(3);
        controller.update_symbols("A", "B").unwrap();
        assert_eq!(controller.symbols().player1(), "A");

        assert!(matches!(
            controller.update_symbols("X", "X"),
            Err(MatchError::InvalidConfiguration(_))
        ));
        assert_eq!(controller.symbols(), &PlayerSymbols::new("A", "B").unwrap());
    }

    #[test]
    fn test_reset_score() {
        let mut controller = in_round(3);
        play(&mut controller, &TOP_ROW_WIN);
        controller.reset_score();
        assert_eq!(controller.score(), Score::default());
        assert_eq!(controller.phase(), MatchPhase::RoundOver);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = MatchConfig::default().with_turn_limit(0);
        assert!(matches!(
            MatchController::new(config),
            Err(MatchError::InvalidConfiguration(_))
        ));
    }
}

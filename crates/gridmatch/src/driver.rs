//! Async event loop that owns a [`MatchController`] and its turn clock.
//!
//! All operations, including timer ticks, are applied one at a time by a
//! single task. Callers hold a cloneable [`MatchHandle`] and observe the
//! match through a `watch` channel of [`MatchSnapshot`]s.

use crate::controller::{MatchController, TickOutcome, TickToken};
use crate::error::MatchError;
use crate::snapshot::MatchSnapshot;
use crate::symbols::PlayerSymbols;
use crate::timer::TurnTimer;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Capacity of the request queue.
const REQUEST_BUFFER: usize = 32;

/// Inbound event for the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRequest {
    /// Start a match on a board of the given size.
    Configure {
        /// Side length (3 to 5).
        size: usize,
        /// Symbols for the match.
        symbols: PlayerSymbols,
    },
    /// Place the current player's mark.
    SubmitMove {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
    },
    /// Take one second off the clock manually.
    Tick,
    /// Begin the next round after a win or draw.
    StartNextRound,
    /// Abandon the current round and start it over.
    RestartRound,
    /// Return to board selection.
    StartNewMatch,
    /// Change both player symbols.
    UpdateSymbols {
        /// Symbol for player 1.
        player1: String,
        /// Symbol for player 2.
        player2: String,
    },
    /// Zero the score.
    ResetScore,
}

type Reply = oneshot::Sender<Result<MatchSnapshot, MatchError>>;

#[derive(Debug)]
struct Command {
    request: MatchRequest,
    reply: Reply,
}

/// Owns the controller and serializes every operation against it.
#[derive(Debug)]
pub struct MatchDriver {
    controller: MatchController,
    timer: TurnTimer,
    tick_period: Duration,
    commands: mpsc::Receiver<Command>,
    ticks_tx: mpsc::UnboundedSender<TickToken>,
    ticks_rx: mpsc::UnboundedReceiver<TickToken>,
    snapshots: watch::Sender<MatchSnapshot>,
}

impl MatchDriver {
    /// Spawns the driver task.
    ///
    /// The task runs until every [`MatchHandle`] has been dropped. Ticks are
    /// emitted every `tick_period` while a turn clock is running.
    #[instrument(skip(controller))]
    pub fn spawn(controller: MatchController, tick_period: Duration) -> (MatchHandle, JoinHandle<()>) {
        let (commands_tx, commands) = mpsc::channel(REQUEST_BUFFER);
        let (ticks_tx, ticks_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(controller.snapshot());

        let mut driver = Self {
            controller,
            timer: TurnTimer::new(),
            tick_period,
            commands,
            ticks_tx,
            ticks_rx,
            snapshots,
        };
        driver.sync_timer();

        let task = tokio::spawn(driver.run());
        let handle = MatchHandle {
            commands: commands_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        info!("Match driver started");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(token) = self.ticks_rx.recv() => self.handle_tick(token),
            }
        }
        self.timer.cancel();
        info!("Match driver stopped");
    }

    fn handle_command(&mut self, command: Command) {
        let Command { request, reply } = command;
        debug!(?request, "Applying request");

        let result = self.apply(request).map(|()| {
            self.sync_timer();
            self.publish()
        });
        if let Err(e) = &result {
            warn!(error = %e, "Request rejected");
        }
        if reply.send(result).is_err() {
            debug!("Caller dropped before reply");
        }
    }

    fn apply(&mut self, request: MatchRequest) -> Result<(), MatchError> {
        let controller = &mut self.controller;
        match request {
            MatchRequest::Configure { size, symbols } => controller.configure(size, symbols),
            MatchRequest::SubmitMove { row, col } => controller.submit_move(row, col).map(|_| ()),
            MatchRequest::Tick => {
                controller.tick();
                Ok(())
            }
            MatchRequest::StartNextRound => controller.start_next_round(),
            MatchRequest::RestartRound => controller.restart_round(),
            MatchRequest::StartNewMatch => controller.start_new_match(),
            MatchRequest::UpdateSymbols { player1, player2 } => {
                controller.update_symbols(player1, player2)
            }
            MatchRequest::ResetScore => {
                controller.reset_score();
                Ok(())
            }
        }
    }

    fn handle_tick(&mut self, token: TickToken) {
        match self.controller.tick_for(token) {
            TickOutcome::Ignored => {}
            outcome => {
                debug!(?outcome, "Tick applied");
                self.sync_timer();
                self.publish();
            }
        }
    }

    /// Restarts or cancels the clock task so it matches the controller.
    fn sync_timer(&mut self) {
        match self.controller.tick_token() {
            Some(token) if self.timer.token() == Some(token) => {}
            Some(token) => self
                .timer
                .start(token, self.tick_period, self.ticks_tx.clone()),
            None => self.timer.cancel(),
        }
    }

    fn publish(&self) -> MatchSnapshot {
        let snapshot = self.controller.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}

/// Cloneable front-end handle to a running [`MatchDriver`].
#[derive(Debug, Clone)]
pub struct MatchHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<MatchSnapshot>,
}

impl MatchHandle {
    /// Sends a request and waits for the resulting snapshot.
    ///
    /// # Errors
    ///
    /// Returns the controller's [`MatchError`] if the request is rejected,
    /// or [`MatchError::Disconnected`] if the driver has stopped.
    #[instrument(skip(self))]
    pub async fn request(&self, request: MatchRequest) -> Result<MatchSnapshot, MatchError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command { request, reply })
            .await
            .map_err(|_| MatchError::Disconnected)?;
        response.await.map_err(|_| MatchError::Disconnected)?
    }

    /// Starts a match. See [`MatchController::configure`].
    pub async fn configure(&self, size: usize, symbols: PlayerSymbols) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::Configure { size, symbols }).await
    }

    /// Plays a move. See [`MatchController::submit_move`].
    pub async fn submit_move(&self, row: usize, col: usize) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::SubmitMove { row, col }).await
    }

    /// Applies one manual tick. See [`MatchController::tick`].
    pub async fn tick(&self) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::Tick).await
    }

    /// See [`MatchController::start_next_round`].
    pub async fn start_next_round(&self) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::StartNextRound).await
    }

    /// See [`MatchController::restart_round`].
    pub async fn restart_round(&self) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::RestartRound).await
    }

    /// See [`MatchController::start_new_match`].
    pub async fn start_new_match(&self) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::StartNewMatch).await
    }

    /// See [`MatchController::update_symbols`].
    pub async fn update_symbols(
        &self,
        player1: impl Into<String>,
        player2: impl Into<String>,
    ) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::UpdateSymbols {
            player1: player1.into(),
            player2: player2.into(),
        })
        .await
    }

    /// See [`MatchController::reset_score`].
    pub async fn reset_score(&self) -> Result<MatchSnapshot, MatchError> {
        self.request(MatchRequest::ResetScore).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> MatchSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every state change, including ticks.
    pub fn subscribe(&self) -> watch::Receiver<MatchSnapshot> {
        self.snapshots.clone()
    }
}

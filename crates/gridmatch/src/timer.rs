//! Cancellable background turn clock.

use crate::controller::TickToken;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant};
use tracing::{debug, instrument};

/// Real-time cadence of the turn clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Handle to the task that emits ticks for one turn.
///
/// The task sends its [`TickToken`] once per period until cancelled. It is
/// aborted when the handle is restarted, cancelled or dropped.
#[derive(Debug, Default)]
pub struct TurnTimer {
    active: Option<(TickToken, JoinHandle<()>)>,
}

impl TurnTimer {
    /// Creates a stopped timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token the running task is ticking for.
    pub fn token(&self) -> Option<TickToken> {
        self.active.as_ref().map(|(token, _)| *token)
    }

    /// Starts ticking for `token`, replacing any running task.
    ///
    /// The first tick fires one full `period` after the call.
    #[instrument(skip(self, ticks))]
    pub fn start(&mut self, token: TickToken, period: Duration, ticks: mpsc::UnboundedSender<TickToken>) {
        self.cancel();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if ticks.send(token).is_err() {
                    debug!(?token, "Tick receiver dropped, stopping timer");
                    break;
                }
            }
        });
        self.active = Some((token, handle));
    }

    /// Stops the running task, if any.
    pub fn cancel(&mut self) {
        if let Some((token, handle)) = self.active.take() {
            debug!(?token, "Cancelling turn timer");
            handle.abort();
        }
    }
}

impl Drop for TurnTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

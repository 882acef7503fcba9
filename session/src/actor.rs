//! Tokio task owning one match and driving its timers.

use std::time::Duration;

use garden_defence_core::{ConfigError, GameConfig, GameSnapshot};
use tokio::{
    sync::{mpsc, oneshot},
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, warn};

use crate::{CommandOutcome, Match, SessionError};

const REQUEST_CAPACITY: usize = 32;

#[derive(Debug)]
enum Request {
    Plant {
        key: String,
        row: u32,
        column: u32,
        reply: oneshot::Sender<CommandOutcome>,
    },
    Collect {
        reply: oneshot::Sender<u32>,
    },
    StartWave {
        reply: oneshot::Sender<CommandOutcome>,
    },
    State {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Reset {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Shutdown,
}

/// Cloneable handle to the task that exclusively owns a [`Match`].
///
/// The task ticks the match every tick interval and pays passive income every
/// income interval. Player requests are queued behind the timers, so no two
/// mutations ever overlap. The task stops once every handle is dropped or
/// [`SessionHandle::shutdown`] is called.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    requests: mpsc::Sender<Request>,
}

impl SessionHandle {
    /// Starts a match on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn spawn(config: GameConfig) -> Result<Self, ConfigError> {
        let game = Match::new(config)?;
        let (requests, inbox) = mpsc::channel(REQUEST_CAPACITY);
        let _ = tokio::spawn(run(game, inbox));
        Ok(Self { requests })
    }

    /// Plants `key` at the zero-based `row` and `column`.
    pub async fn plant(
        &self,
        key: impl Into<String>,
        row: u32,
        column: u32,
    ) -> Result<CommandOutcome, SessionError> {
        let key = key.into();
        self.request(|reply| Request::Plant {
            key,
            row,
            column,
            reply,
        })
        .await
    }

    /// Collects one income portion and returns the amount collected.
    pub async fn collect_resources(&self) -> Result<u32, SessionError> {
        self.request(|reply| Request::Collect { reply }).await
    }

    /// Releases the current wave's burst of invaders.
    pub async fn start_wave(&self) -> Result<CommandOutcome, SessionError> {
        self.request(|reply| Request::StartWave { reply }).await
    }

    /// Captures the match state.
    pub async fn state(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| Request::State { reply }).await
    }

    /// Replaces the match with a fresh one and restarts both timers.
    pub async fn reset(&self) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| Request::Reset { reply }).await
    }

    /// Stops the task. Requests already queued behind this one fail with
    /// [`SessionError::Closed`].
    pub async fn shutdown(&self) {
        if self.requests.send(Request::Shutdown).await.is_err() {
            debug!("session already stopped");
        }
    }

    /// Reports whether the owning task has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.requests.is_closed()
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Request,
    ) -> Result<T, SessionError> {
        let (reply, answer) = oneshot::channel();
        if self.requests.send(build(reply)).await.is_err() {
            warn!("session task is gone");
            return Err(SessionError::Closed);
        }
        answer.await.map_err(|_| SessionError::Closed)
    }
}

async fn run(mut game: Match, mut inbox: mpsc::Receiver<Request>) {
    let mut combat = timer(game.config().tick_interval());
    let mut income = timer(game.config().income_interval());

    loop {
        tokio::select! {
            request = inbox.recv() => {
                let Some(request) = request else {
                    break;
                };
                match request {
                    Request::Plant { key, row, column, reply } => {
                        let _ = reply.send(game.plant(&key, row, column));
                    }
                    Request::Collect { reply } => {
                        let _ = reply.send(game.collect_resources());
                    }
                    Request::StartWave { reply } => {
                        let _ = reply.send(game.start_wave());
                    }
                    Request::State { reply } => {
                        let _ = reply.send(game.state());
                    }
                    Request::Reset { reply } => {
                        game.reset();
                        combat.reset();
                        income.reset();
                        let _ = reply.send(game.state());
                    }
                    Request::Shutdown => break,
                }
            }
            _ = combat.tick() => {
                let _ = game.tick();
            }
            _ = income.tick() => {
                let _ = game.produce_income();
            }
        }
    }

    debug!("session task stopped");
}

fn timer(period: Duration) -> Interval {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

//! One-second countdown for running timers.
//!
//! [`advance`] is the per-tick state transition: every running timer loses one
//! second, and a timer reaching zero stops and is reported as completed.
//! [`TickEngine`] drives it once per period against a [`TimerService`].
//!
//! ## Overlap policy
//!
//! Ticks run one after another inside a single task. A tick's notification
//! side effects finish before the next tick is awaited, and any periods that
//! elapse meanwhile are skipped rather than replayed in a burst.

use crate::db::blob::BlobStore;
use crate::libs::messages::Message;
use crate::libs::notification::NotificationCenter;
use crate::libs::service::TimerService;
use crate::libs::timer::Timer;
use crate::{msg_debug, msg_error, msg_info};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

/// Result of one tick for a single timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The timer was not running.
    Idle,
    Running { remaining: u32 },
    /// The countdown reached zero and the timer stopped.
    Completed,
}

/// Decrements one timer by a second.
pub fn step(timer: &mut Timer, at: DateTime<Utc>) -> Step {
    let Some(remaining) = timer.remaining_time else {
        return Step::Idle;
    };

    let remaining = remaining.saturating_sub(1);
    if remaining == 0 {
        timer.stop(at);
        Step::Completed
    } else {
        timer.remaining_time = Some(remaining);
        timer.updated_at = at;
        Step::Running { remaining }
    }
}

/// Timers touched by one tick, captured after the decrement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub running: Vec<Timer>,
    pub completed: Vec<Timer>,
}

impl TickOutcome {
    pub fn is_empty(&self) -> bool {
        self.running.is_empty() && self.completed.is_empty()
    }
}

/// Applies one tick to every timer using the same `at` instant.
pub fn advance(timers: &mut [Timer], at: DateTime<Utc>) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    for timer in timers.iter_mut() {
        match step(timer, at) {
            Step::Idle => {}
            Step::Running { .. } => outcome.running.push(timer.clone()),
            Step::Completed => outcome.completed.push(timer.clone()),
        }
    }
    outcome
}

/// Handle to a spawned [`TickEngine`] task.
pub struct TickHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl TickHandle {
    /// Stops the engine after any in-flight tick and waits for the task.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            msg_error!(Message::TickEngineTaskFailed(e.to_string()));
        }
    }
}

pub struct TickEngine;

impl TickEngine {
    /// Spawns the periodic tick loop. The first tick fires one `period` after
    /// the call.
    pub fn spawn<S, N>(service: Arc<TimerService<S, N>>, period: Duration) -> TickHandle
    where
        S: BlobStore + 'static,
        N: NotificationCenter + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            msg_debug!(Message::TickEngineStarted(period.as_millis() as u64));

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => {
                        let outcome = service.tick(Utc::now()).await;
                        if !outcome.is_empty() {
                            msg_debug!(Message::Tick {
                                running: outcome.running.len(),
                                completed: outcome.completed.len(),
                            });
                        }
                    }
                }
            }

            msg_info!(Message::TickEngineStopped);
        });

        TickHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

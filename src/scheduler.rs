//! Periodic driver for publish cycles.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use crate::publish::{CycleStats, Publisher};
use crate::telegram::Transport;

/// Text sent once at startup to confirm the bot can reach the channel.
pub const STARTUP_MESSAGE: &str = "✅ Тест: бот по психологии семьи запущен!";

/// Send the startup confirmation. Failure is logged and otherwise ignored.
pub async fn send_startup_check(transport: &dyn Transport) -> bool {
    match transport.send_message(STARTUP_MESSAGE).await {
        Ok(()) => {
            tracing::info!("Startup check message sent");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup check message failed");
            false
        }
    }
}

/// Fires [`Publisher::run_cycle`] on a fixed interval.
///
/// The first cycle runs one full interval after [`Scheduler::run`] starts.
/// Cycles never overlap: the next tick is awaited only after the current
/// cycle returns, and ticks missed while a cycle was running are skipped.
pub struct Scheduler {
    publisher: Arc<Publisher>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(publisher: Arc<Publisher>, interval: Duration) -> Self {
        Self {
            publisher,
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run cycles until `shutdown` resolves. Returns the number of cycles run.
    pub async fn run<F>(&self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        let mut timer = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tokio::pin!(shutdown);
        let mut cycles = 0;

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            sources = self.publisher.sources().len(),
            "Scheduler started"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(cycles, "Scheduler stopping");
                    return cycles;
                }
                _ = timer.tick() => {
                    let stats: CycleStats = self.publisher.run_cycle().await;
                    cycles += 1;
                    tracing::debug!(cycle = cycles, delivered = stats.delivered(), "Cycle complete");
                }
            }
        }
    }
}

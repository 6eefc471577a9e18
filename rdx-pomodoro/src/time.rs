//! The recurring tick source behind a running scheduler.

use crate::config::ClockResolution;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

/// A cancellable ticker that runs as an independent asynchronous task.
///
/// The first tick lands one full period after `spawn`, never immediately, so a
/// fresh start or a resume does not eat a second of the countdown. Cancel it by
/// aborting the returned handle.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    period: Duration,
}

impl SessionClock {
    pub fn new(resolution: ClockResolution) -> Self {
        Self {
            period: resolution.tick_period(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the clock's loop on a new Tokio task.
    ///
    /// The loop awaits each tick and runs `on_tick`, continuing for as long as
    /// the callback resolves to `true`.
    pub fn spawn<F, Fut>(self, mut on_tick: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            let mut tick_count: u64 = 0;
            loop {
                ticker.tick().await;
                tick_count += 1;
                trace!("Clock tick #{}", tick_count);
                if !on_tick().await {
                    break;
                }
            }
            trace!("Clock task finished after {} ticks.", tick_count);
        })
    }
}

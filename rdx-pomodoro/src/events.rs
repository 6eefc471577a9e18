//! Defines the values handed to observers and broadcast by the scheduler.

use crate::common::{SessionType, TimerState};
use chrono::{DateTime, Local};

/// A point-in-time view of the scheduler.
///
/// Passed to the tick observer after every decrement, so it always carries the
/// new remaining time and the session it belongs to. Also returned by
/// `SessionScheduler::snapshot` for an initial render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub session: SessionType,
    pub remaining_seconds: u64,
    /// Full length of `session`, for progress calculations.
    pub total_seconds: u64,
    pub completed_work_sessions: u32,
}

impl TimerSnapshot {
    /// Elapsed share of the current session, from 0.0 to 100.0.
    pub fn progress_percent(&self) -> f64 {
        if self.total_seconds == 0 {
            return 0.0;
        }
        let elapsed = self.total_seconds.saturating_sub(self.remaining_seconds);
        elapsed as f64 / self.total_seconds as f64 * 100.0
    }
}

/// Delivered to the completion observer when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCompletion {
    /// The session that just ran out.
    pub finished: SessionType,
    /// The session the scheduler is rotating into.
    pub next: SessionType,
    /// Work sessions completed so far, including `finished` if it was one.
    pub completed_work_sessions: u32,
}

/// Lifecycle events broadcast to every subscriber.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Fired when the clock is (re)started.
    TimerStarted {
        session: SessionType,
        remaining_seconds: u64,
        at: DateTime<Local>,
    },
    /// Fired when a running timer is paused.
    TimerPaused {
        remaining_seconds: u64,
        at: DateTime<Local>,
    },
    /// Fired on every `stop()`, which also resets the cycle.
    TimerStopped { at: DateTime<Local> },
    /// Fired on every `reset()`.
    TimerReset { at: DateTime<Local> },
    /// Fired after the completion observer has seen a rotation.
    SessionCompleted {
        finished: SessionType,
        next: SessionType,
        at: DateTime<Local>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(remaining_seconds: u64, total_seconds: u64) -> TimerSnapshot {
        TimerSnapshot {
            state: TimerState::Running,
            session: SessionType::Work,
            remaining_seconds,
            total_seconds,
            completed_work_sessions: 0,
        }
    }

    #[test]
    fn progress_is_elapsed_over_total() {
        assert_eq!(snapshot(1500, 1500).progress_percent(), 0.0);
        assert_eq!(snapshot(750, 1500).progress_percent(), 50.0);
        assert_eq!(snapshot(0, 1500).progress_percent(), 100.0);
    }

    #[test]
    fn empty_session_has_no_progress() {
        assert_eq!(snapshot(0, 0).progress_percent(), 0.0);
    }
}

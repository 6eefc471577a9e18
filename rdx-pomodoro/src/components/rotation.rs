//! The work/break rotation rule.

use crate::common::SessionType;

/// Decides which session follows the one that just finished.
///
/// Work is always followed by a break. The break is long when the running
/// count of completed work sessions is a multiple of
/// `sessions_until_long_break`, short otherwise. Every break is followed by
/// work; breaks are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    sessions_until_long_break: u32,
}

impl RotationPolicy {
    /// `sessions_until_long_break` must be at least 1; the configuration is
    /// validated before a policy is built from it.
    pub fn new(sessions_until_long_break: u32) -> Self {
        Self {
            sessions_until_long_break,
        }
    }

    /// Returns the session after `finished`, counting it in
    /// `completed_work_sessions` if it was a work session.
    pub fn next_session(&self, finished: SessionType, completed_work_sessions: &mut u32) -> SessionType {
        match finished {
            SessionType::Work => {
                *completed_work_sessions += 1;
                if *completed_work_sessions % self.sessions_until_long_break == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                }
            }
            SessionType::ShortBreak | SessionType::LongBreak => SessionType::Work,
        }
    }
}

//! Session-complete alerts.
//!
//! An alert must never take the timer down with it. `AlertTrigger` swallows
//! every notifier error, logs it, and rings the terminal bell instead.

use anyhow::{anyhow, Result};
use notify_rust::Notification;
use pomodoro::prelude::*;
use std::io::{self, Write};
use tracing::warn;

/// Something that can tell the user a session has ended.
pub trait Notifier: Send + Sync {
    fn notify(&self, completion: &SessionCompletion) -> Result<()>;
}

/// The text of the alert. Work and break endings read differently.
pub fn alert_message(completion: &SessionCompletion) -> String {
    if completion.finished.is_break() {
        format!("{} is over. Back to work!", completion.finished)
    } else {
        format!("Work session complete! Time for a {}.", completion.next.label().to_lowercase())
    }
}

/// Raises a desktop notification.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, completion: &SessionCompletion) -> Result<()> {
        Notification::new()
            .summary("Pomodoro")
            .body(&alert_message(completion))
            .show()
            .map_err(|err| anyhow!("desktop notification failed: {err}"))?;
        Ok(())
    }
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self, _completion: &SessionCompletion) -> Result<()> {
        ring_bell()?;
        Ok(())
    }
}

fn ring_bell() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(b"\x07")?;
    stdout.flush()
}

pub struct AlertTrigger {
    notifier: Box<dyn Notifier>,
}

impl AlertTrigger {
    pub fn new(notifier: Box<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Fires the alert. Returns `false` if the bell fallback had to be used.
    pub fn fire(&self, completion: &SessionCompletion) -> bool {
        match self.notifier.notify(completion) {
            Ok(()) => true,
            Err(err) => {
                warn!("Could not play the session alert: {err:#}");
                if let Err(bell_err) = ring_bell() {
                    warn!("Terminal bell failed too: {bell_err}");
                }
                false
            }
        }
    }
}

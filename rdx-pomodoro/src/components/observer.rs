//! Single-subscriber observer slots.

use crate::events::{SessionCompletion, TimerSnapshot};
use tracing::debug;

/// A closure that receives every tick.
pub type TickObserver = Box<dyn FnMut(&TimerSnapshot) + Send>;

/// A closure that receives every session completion.
pub type CompletionObserver = Box<dyn FnMut(&SessionCompletion) + Send>;

/// Holds at most one observer.
///
/// Registration is deliberately last-writer-wins: installing an observer
/// silently discards whichever one was there before. Hosts that need fan-out
/// subscribe to the `SystemEvent` broadcast instead.
pub struct ObserverSlot<T> {
    name: &'static str,
    current: Option<T>,
}

impl<T> ObserverSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            current: None,
        }
    }

    /// Installs `observer`, returning `true` if a previous one was displaced.
    pub fn replace(&mut self, observer: T) -> bool {
        let displaced = self.current.replace(observer).is_some();
        if displaced {
            debug!("Replaced the existing {} observer.", self.name);
        }
        displaced
    }

    /// Removes the current observer, returning `true` if there was one.
    pub fn clear(&mut self) -> bool {
        let removed = self.current.take().is_some();
        if removed {
            debug!("Cleared the {} observer.", self.name);
        }
        removed
    }
}

impl ObserverSlot<TickObserver> {
    pub(crate) fn notify(&mut self, snapshot: &TimerSnapshot) {
        if let Some(observer) = self.current.as_mut() {
            observer(snapshot);
        }
    }
}

impl ObserverSlot<CompletionObserver> {
    pub(crate) fn notify(&mut self, completion: &SessionCompletion) {
        if let Some(observer) = self.current.as_mut() {
            observer(completion);
        }
    }
}

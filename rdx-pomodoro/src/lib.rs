//! # Pomodoro
//!
//! A tick-driven countdown scheduler that alternates work and break sessions.
//!
//! The crate provides the core state machine for the Pomodoro technique. An
//! application (a shell, a tray icon, a headless runner) hosts a
//! `SessionScheduler`, issues lifecycle commands to it, and observes it through
//! two single-slot observers.
//!
//! ## Core Concepts
//!
//! - **SessionClock**: A cancellable recurring ticker, nominally once per second,
//!   that is the scheduler's only source of time.
//! - **Rotation**: Every finished work session bumps a counter. Every Nth one is
//!   followed by a long break, the rest by a short break. Breaks always return
//!   to work.
//! - **Observers**: One tick observer and one completion observer. Registering a
//!   new observer replaces the old one; there is no fan-out. Lifecycle changes
//!   are additionally broadcast as `SystemEvent`s to any number of subscribers.
//! - **Configuration-Driven**: Durations, the long break threshold and the clock
//!   resolution come from a `PomodoroConfig`, often loaded from a TOML file.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pomodoro::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. Build and validate a configuration.
//!     let scheduler = SessionScheduler::new(PomodoroConfig::default())?;
//!
//!     // 2. Observe the countdown.
//!     scheduler
//!         .register_tick_callback(|snapshot| println!("{} left", snapshot.remaining_seconds))
//!         .await;
//!     scheduler
//!         .register_completion_callback(|done| println!("{} -> {}", done.finished, done.next))
//!         .await;
//!
//!     // 3. Start counting down and wait for Ctrl+C.
//!     scheduler.start().await;
//!     tokio::signal::ctrl_c().await?;
//!     scheduler.stop().await;
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Pomodoro Scheduler";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Declare all the modules in the crate.
pub mod common;
pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod scheduler;
pub mod time;

/// A prelude module for easy importing of the most common Pomodoro types.
pub mod prelude {
    pub use crate::common::{SessionType, TimerState};
    pub use crate::config::{ClockResolution, PomodoroConfig};
    pub use crate::error::ConfigError;
    pub use crate::events::{SessionCompletion, SystemEvent, TimerSnapshot};
    pub use crate::scheduler::SessionScheduler;
}

//! Error types for the scheduler.
//!
//! Lifecycle operations never fail. The only thing that can go wrong is a
//! configuration that would make the countdown or the rotation rule
//! meaningless, and that is rejected once, at construction.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A session duration of zero minutes.
    #[error("{field} must be a positive number of minutes")]
    ZeroDuration { field: &'static str },

    /// The long break threshold is used as a modulus and cannot be zero.
    #[error("sessions_until_long_break must be at least 1")]
    ZeroSessionsUntilLongBreak,

    #[error("clock resolution must tick at least once per second")]
    ZeroTickRate,

    /// The layered file/environment sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

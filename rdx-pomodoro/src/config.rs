//! Defines the configuration for the session scheduler.
//!
//! The struct is designed to be deserialized from a TOML file using `serde`,
//! layered under `POMODORO_*` environment variables with the `config` crate.
//! Every field has a default, so an empty file (or no file at all) yields the
//! classic 25/5/15 cycle with a long break after every fourth work session.

use crate::common::SessionType;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// The immutable configuration handed to a `SessionScheduler`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    /// Length of a work session, in minutes.
    pub work_duration: u32,
    /// Length of a short break, in minutes.
    pub short_break_duration: u32,
    /// Length of a long break, in minutes.
    pub long_break_duration: u32,
    /// A long break follows every Nth completed work session.
    pub sessions_until_long_break: u32,
    /// How fast the session clock ticks.
    pub resolution: ClockResolution,
}

/// Defines the operational speed of the `SessionClock`.
///
/// One tick always removes one second from the countdown. `Realtime` delivers
/// that tick once per wall-clock second; `Custom` compresses time, which is
/// handy for demos and dry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockResolution {
    /// 1 tick per second.
    #[default]
    Realtime,
    /// A user-defined speed in ticks per second.
    Custom { ticks_per_second: u64 },
}

impl ClockResolution {
    /// The wall-clock period between two ticks.
    pub fn tick_period(&self) -> Duration {
        match self {
            ClockResolution::Realtime => Duration::from_secs(1),
            ClockResolution::Custom { ticks_per_second } => {
                let nanos = 1_000_000_000 / (*ticks_per_second).max(1);
                Duration::from_nanos(nanos.max(1))
            }
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            sessions_until_long_break: 4,
            resolution: ClockResolution::default(),
        }
    }
}

impl PomodoroConfig {
    /// Loads the configuration from an optional TOML file and the environment.
    ///
    /// Sources are layered in order: built-in defaults, then `path` (which must
    /// exist when given), then any `POMODORO_*` variable such as
    /// `POMODORO_WORK_DURATION=50`. The result is validated before it is
    /// returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix("POMODORO").try_parsing(true));

        let loaded: PomodoroConfig = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Rejects values that would make the countdown or the rotation undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("work_duration", self.work_duration),
            ("short_break_duration", self.short_break_duration),
            ("long_break_duration", self.long_break_duration),
        ];
        for (field, minutes) in durations {
            if minutes == 0 {
                return Err(ConfigError::ZeroDuration { field });
            }
        }
        if self.sessions_until_long_break == 0 {
            return Err(ConfigError::ZeroSessionsUntilLongBreak);
        }
        if let ClockResolution::Custom { ticks_per_second: 0 } = self.resolution {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    /// The configured length of `session`, in minutes.
    pub fn duration_minutes(&self, session: SessionType) -> u32 {
        match session {
            SessionType::Work => self.work_duration,
            SessionType::ShortBreak => self.short_break_duration,
            SessionType::LongBreak => self.long_break_duration,
        }
    }

    /// The configured length of `session`, in whole seconds.
    pub fn duration_seconds(&self, session: SessionType) -> u64 {
        u64::from(self.duration_minutes(session)) * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    /// `load` reads the process environment, so tests that call it take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Sets an environment variable for the lifetime of the guard.
    struct EnvVar(&'static str);

    impl EnvVar {
        fn set(key: &'static str, value: &str) -> Self {
            std::env::set_var(key, value);
            Self(key)
        }
    }

    impl Drop for EnvVar {
        fn drop(&mut self) {
            std::env::remove_var(self.0);
        }
    }

    #[test]
    fn default_is_the_classic_cycle() {
        let config = PomodoroConfig::default();
        assert_eq!(config.duration_seconds(SessionType::Work), 1500);
        assert_eq!(config.duration_seconds(SessionType::ShortBreak), 300);
        assert_eq!(config.duration_seconds(SessionType::LongBreak), 900);
        assert_eq!(config.sessions_until_long_break, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_durations_are_rejected() {
        let config = PomodoroConfig {
            short_break_duration: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::ZeroDuration { field }) => assert_eq!(field, "short_break_duration"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_long_break_threshold_is_rejected() {
        let config = PomodoroConfig {
            sessions_until_long_break: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroSessionsUntilLongBreak)
        ));
    }

    #[test]
    fn zero_tick_rate_is_rejected() {
        let config = PomodoroConfig {
            resolution: ClockResolution::Custom { ticks_per_second: 0 },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTickRate)));
    }

    #[test]
    fn resolution_controls_tick_period() {
        assert_eq!(ClockResolution::Realtime.tick_period(), Duration::from_secs(1));
        assert_eq!(
            ClockResolution::Custom { ticks_per_second: 100 }.tick_period(),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn loads_partial_toml_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "work_duration = 50\nsessions_until_long_break = 2\n\n[resolution.custom]\nticks_per_second = 20"
        )
        .unwrap();

        let _lock = env_lock();
        let config = PomodoroConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.work_duration, 50);
        assert_eq!(config.short_break_duration, 5);
        assert_eq!(config.long_break_duration, 15);
        assert_eq!(config.sessions_until_long_break, 2);
        assert_eq!(config.resolution, ClockResolution::Custom { ticks_per_second: 20 });
    }

    #[test]
    fn loading_an_invalid_file_fails_fast() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "long_break_duration = 0").unwrap();

        let _lock = env_lock();
        assert!(matches!(
            PomodoroConfig::load(Some(file.path())),
            Err(ConfigError::ZeroDuration { field: "long_break_duration" })
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let _lock = env_lock();
        assert!(matches!(
            PomodoroConfig::load(Some(missing.as_path())),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn environment_overrides_the_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "work_duration = 40\nsessions_until_long_break = 2").unwrap();

        let _lock = env_lock();
        let _work = EnvVar::set("POMODORO_WORK_DURATION", "50");
        let config = PomodoroConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.work_duration, 50);
        assert_eq!(config.sessions_until_long_break, 2);
        assert_eq!(config.short_break_duration, 5);
    }

    #[test]
    fn environment_alone_overrides_defaults() {
        let _lock = env_lock();
        let _long = EnvVar::set("POMODORO_LONG_BREAK_DURATION", "30");
        let config = PomodoroConfig::load(None).unwrap();
        assert_eq!(config.long_break_duration, 30);
        assert_eq!(config.work_duration, 25);
    }

    #[test]
    fn invalid_environment_value_fails_validation() {
        let _lock = env_lock();
        let _rounds = EnvVar::set("POMODORO_SESSIONS_UNTIL_LONG_BREAK", "0");
        assert!(matches!(
            PomodoroConfig::load(None),
            Err(ConfigError::ZeroSessionsUntilLongBreak)
        ));
    }
}

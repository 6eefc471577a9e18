use anyhow::{Context, Result};
use pomodoro::prelude::*;
use pomodoro::time::SessionClock;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Headless runner: loads a config, runs the scheduler and logs everything it
/// does until Ctrl+C.
///
/// Usage: `pomodev [CONFIG.toml]`
#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    // 2. Load the configuration, if a file was given.
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = PomodoroConfig::load(config_path.as_deref())
        .context("could not load the Pomodoro configuration")?;
    info!(
        "{} v{}: {}/{}/{} minutes, long break every {} work sessions, tick every {:?}.",
        pomodoro::ENGINE_NAME,
        pomodoro::VERSION,
        config.work_duration,
        config.short_break_duration,
        config.long_break_duration,
        config.sessions_until_long_break,
        SessionClock::new(config.resolution).period()
    );

    // 3. Create the scheduler and attach the observers.
    let scheduler = SessionScheduler::new(config)?;
    spawn_event_listeners(&scheduler);
    register_observers(&scheduler).await;

    // 4. Run until Ctrl+C.
    scheduler.start().await;
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received.");
    scheduler.stop().await;

    Ok(())
}

/// Spawns a task that logs the scheduler's lifecycle broadcast.
fn spawn_event_listeners(scheduler: &SessionScheduler) {
    let mut system_rx = scheduler.subscribe_system_events();
    tokio::spawn(async move {
        loop {
            match system_rx.recv().await {
                Ok(event) => info!("[SYSTEM] => {:?}", event),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("[SYSTEM] listener lagged; {} events dropped.", missed)
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Logs a countdown line once a minute and every completion.
async fn register_observers(scheduler: &SessionScheduler) {
    scheduler
        .register_tick_callback(|snapshot| {
            if snapshot.remaining_seconds % 60 == 0 {
                info!(
                    "[TICK] {} {:02}:{:02} ({:.1}%)",
                    snapshot.session,
                    snapshot.remaining_seconds / 60,
                    snapshot.remaining_seconds % 60,
                    snapshot.progress_percent()
                );
            }
        })
        .await;

    scheduler
        .register_completion_callback(|done| {
            info!(
                "[COMPLETE] {} finished, {} next (#{} work sessions).",
                done.finished, done.next, done.completed_work_sessions
            );
        })
        .await;
}

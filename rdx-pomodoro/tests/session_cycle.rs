//! End-to-end cycle scenarios driven through the public API on virtual time.

use pomodoro::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Completions = Arc<Mutex<Vec<(SessionType, SessionType)>>>;

async fn scheduler_with_recorder(config: PomodoroConfig) -> (SessionScheduler, Completions) {
    let scheduler = SessionScheduler::new(config).expect("valid config");
    let completions: Completions = Arc::new(Mutex::new(Vec::new()));
    let sink = completions.clone();
    scheduler
        .register_completion_callback(move |done| {
            sink.lock().unwrap().push((done.finished, done.next));
        })
        .await;
    (scheduler, completions)
}

/// Lets `ticks` one-second ticks elapse, landing halfway between two ticks.
async fn run_for(ticks: u64) {
    tokio::time::sleep(Duration::from_secs(ticks) + Duration::from_millis(500)).await;
}

#[tokio::test(start_paused = true)]
async fn first_work_session_rotates_into_a_short_break() {
    let (scheduler, completions) = scheduler_with_recorder(PomodoroConfig::default()).await;

    scheduler.start().await;
    run_for(25 * 60).await;

    assert_eq!(
        *completions.lock().unwrap(),
        vec![(SessionType::Work, SessionType::ShortBreak)]
    );
    assert_eq!(scheduler.current_session().await, SessionType::ShortBreak);
    assert_eq!(scheduler.time_remaining_seconds().await, 300);
    assert_eq!(scheduler.completed_work_sessions().await, 1);
    assert_eq!(scheduler.state().await, TimerState::Running);
}

#[tokio::test(start_paused = true)]
async fn fourth_work_session_earns_the_long_break() {
    let (scheduler, completions) = scheduler_with_recorder(PomodoroConfig::default()).await;

    scheduler.start().await;
    // Four work sessions with three short breaks in between.
    run_for(4 * 1500 + 3 * 300).await;

    let completions = completions.lock().unwrap().clone();
    assert_eq!(
        completions,
        vec![
            (SessionType::Work, SessionType::ShortBreak),
            (SessionType::ShortBreak, SessionType::Work),
            (SessionType::Work, SessionType::ShortBreak),
            (SessionType::ShortBreak, SessionType::Work),
            (SessionType::Work, SessionType::ShortBreak),
            (SessionType::ShortBreak, SessionType::Work),
            (SessionType::Work, SessionType::LongBreak),
        ]
    );
    assert_eq!(scheduler.completed_work_sessions().await, 4);
    assert_eq!(scheduler.current_session().await, SessionType::LongBreak);
    assert_eq!(scheduler.time_remaining_seconds().await, 900);
}

#[tokio::test(start_paused = true)]
async fn long_breaks_recur_every_nth_work_session() {
    let config = PomodoroConfig {
        work_duration: 1,
        short_break_duration: 1,
        long_break_duration: 1,
        sessions_until_long_break: 3,
        ..Default::default()
    };
    let (scheduler, completions) = scheduler_with_recorder(config).await;

    scheduler.start().await;
    // Nine work sessions and eight breaks, one minute each.
    run_for(17 * 60).await;

    let work_breaks: Vec<SessionType> = completions
        .lock()
        .unwrap()
        .iter()
        .filter(|(finished, _)| *finished == SessionType::Work)
        .map(|(_, next)| *next)
        .collect();
    assert_eq!(work_breaks.len(), 9);
    for (index, next) in work_breaks.iter().enumerate() {
        let expected = if (index + 1) % 3 == 0 {
            SessionType::LongBreak
        } else {
            SessionType::ShortBreak
        };
        assert_eq!(*next, expected, "work completion #{}", index + 1);
    }
}

#[tokio::test(start_paused = true)]
async fn reset_after_progress_restores_the_initial_work_session() {
    let (scheduler, _) = scheduler_with_recorder(PomodoroConfig::default()).await;

    scheduler.start().await;
    run_for(1500 + 120).await;
    scheduler.pause().await;
    assert_eq!(scheduler.current_session().await, SessionType::ShortBreak);

    scheduler.reset().await;
    let snapshot = scheduler.snapshot().await;
    assert_eq!(snapshot.state, TimerState::Paused);
    assert_eq!(snapshot.session, SessionType::Work);
    assert_eq!(snapshot.completed_work_sessions, 0);
    assert_eq!(snapshot.remaining_seconds, 1500);
}

#[tokio::test(start_paused = true)]
async fn accelerated_clock_compresses_a_session() {
    let config = PomodoroConfig {
        work_duration: 1,
        resolution: ClockResolution::Custom {
            ticks_per_second: 60,
        },
        ..Default::default()
    };
    let (scheduler, completions) = scheduler_with_recorder(config).await;

    scheduler.start().await;
    tokio::time::sleep(Duration::from_millis(1_010)).await;

    assert_eq!(
        *completions.lock().unwrap(),
        vec![(SessionType::Work, SessionType::ShortBreak)]
    );
}

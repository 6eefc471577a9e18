//! The session scheduler: countdown state, rotation and lifecycle control.

use crate::common::{SessionType, TimerState};
use crate::components::observer::{CompletionObserver, ObserverSlot, TickObserver};
use crate::components::rotation::RotationPolicy;
use crate::config::PomodoroConfig;
use crate::error::ConfigError;
use crate::events::{SessionCompletion, SystemEvent, TimerSnapshot};
use crate::time::SessionClock;
use chrono::Local;
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

/// The mutable countdown state, guarded by the scheduler's lock.
pub(crate) struct SchedulerCore {
    config: Arc<PomodoroConfig>,
    rotation: RotationPolicy,
    state: TimerState,
    current_session: SessionType,
    completed_work_sessions: u32,
    time_remaining: u64,
    clock_handle: Option<JoinHandle<()>>,
    /// Bumped on every start; a clock task from an older start stops itself.
    clock_generation: u64,
    tick_observer: ObserverSlot<TickObserver>,
    completion_observer: ObserverSlot<CompletionObserver>,
}

impl SchedulerCore {
    pub(crate) fn new(config: Arc<PomodoroConfig>) -> Self {
        let rotation = RotationPolicy::new(config.sessions_until_long_break);
        let time_remaining = config.duration_seconds(SessionType::Work);
        Self {
            config,
            rotation,
            state: TimerState::Stopped,
            current_session: SessionType::Work,
            completed_work_sessions: 0,
            time_remaining,
            clock_handle: None,
            clock_generation: 0,
            tick_observer: ObserverSlot::new("tick"),
            completion_observer: ObserverSlot::new("completion"),
        }
    }

    /// Back to the first work session. The timer state is left alone.
    pub(crate) fn reset(&mut self) {
        self.current_session = SessionType::Work;
        self.completed_work_sessions = 0;
        self.time_remaining = self.config.duration_seconds(SessionType::Work);
    }

    pub(crate) fn halt_clock(&mut self) {
        if let Some(handle) = self.clock_handle.take() {
            handle.abort();
        }
    }

    pub(crate) fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            session: self.current_session,
            remaining_seconds: self.time_remaining,
            total_seconds: self.config.duration_seconds(self.current_session),
            completed_work_sessions: self.completed_work_sessions,
        }
    }

    /// Advances the countdown by one second.
    ///
    /// The tick observer sees the decremented value first, including the zero
    /// on the final tick. Only then does the session rotate.
    pub(crate) fn tick(&mut self) -> Option<SessionCompletion> {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        let snapshot = self.snapshot();
        self.tick_observer.notify(&snapshot);

        if self.time_remaining == 0 {
            Some(self.complete_session())
        } else {
            None
        }
    }

    fn complete_session(&mut self) -> SessionCompletion {
        let finished = self.current_session;
        let next = self
            .rotation
            .next_session(finished, &mut self.completed_work_sessions);
        let completion = SessionCompletion {
            finished,
            next,
            completed_work_sessions: self.completed_work_sessions,
        };
        self.completion_observer.notify(&completion);

        self.current_session = next;
        self.time_remaining = self.config.duration_seconds(next);
        completion
    }
}

/// The main Pomodoro scheduler.
///
/// This struct is the central point of control. It owns the configuration, the
/// countdown state and the clock task that drives it. The scheduler is cheap to
/// clone; every clone is a handle to the same timer.
///
/// Observers run synchronously inside the tick, while the scheduler is
/// locked. They must not block, and they cannot call back into the scheduler;
/// everything they need is in the value they are handed.
#[derive(Clone)]
pub struct SessionScheduler {
    config: Arc<PomodoroConfig>,
    clock: SessionClock,
    core: Arc<Mutex<SchedulerCore>>,
    system_event_sender: broadcast::Sender<SystemEvent>,
}

// Core implementation block for internal logic.
impl SessionScheduler {
    /// Creates a stopped scheduler positioned at the start of a work session.
    ///
    /// Fails if the configuration would make the countdown or the long break
    /// rule meaningless.
    pub fn new(config: PomodoroConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (system_event_sender, _) = broadcast::channel(64);
        let config = Arc::new(config);
        Ok(Self {
            clock: SessionClock::new(config.resolution),
            core: Arc::new(Mutex::new(SchedulerCore::new(config.clone()))),
            config,
            system_event_sender,
        })
    }

    #[doc(hidden)]
    async fn on_clock_tick(
        core: Weak<Mutex<SchedulerCore>>,
        generation: u64,
        system_event_sender: broadcast::Sender<SystemEvent>,
    ) -> bool {
        let Some(shared) = core.upgrade() else {
            trace!("Scheduler dropped; ending clock task.");
            return false;
        };
        let mut core = shared.lock().await;
        if core.state != TimerState::Running || core.clock_generation != generation {
            return false;
        }

        if let Some(completion) = core.tick() {
            info!(
                "{} session complete; next up: {} ({} work sessions done).",
                completion.finished, completion.next, completion.completed_work_sessions
            );
            system_event_sender
                .send(SystemEvent::SessionCompleted {
                    finished: completion.finished,
                    next: completion.next,
                    at: Local::now(),
                })
                .ok();
        }
        true
    }
}

// Public API implementation block.
impl SessionScheduler {
    /// Starts or resumes the countdown.
    ///
    /// Does nothing if the timer is already running, so there is never more
    /// than one clock feeding ticks into the scheduler.
    pub async fn start(&self) {
        let mut core = self.core.lock().await;
        if core.state == TimerState::Running {
            debug!("start() ignored: timer is already running.");
            return;
        }

        core.state = TimerState::Running;
        core.clock_generation += 1;
        let generation = core.clock_generation;
        let weak_core = Arc::downgrade(&self.core);
        let sender = self.system_event_sender.clone();
        core.clock_handle = Some(self.clock.spawn(move || {
            Self::on_clock_tick(weak_core.clone(), generation, sender.clone())
        }));

        info!(
            "Timer started: {} with {}s remaining.",
            core.current_session, core.time_remaining
        );
        self.system_event_sender
            .send(SystemEvent::TimerStarted {
                session: core.current_session,
                remaining_seconds: core.time_remaining,
                at: Local::now(),
            })
            .ok();
    }

    /// Pauses a running countdown, preserving the session and remaining time.
    ///
    /// Does nothing unless the timer is running.
    pub async fn pause(&self) {
        let mut core = self.core.lock().await;
        if core.state != TimerState::Running {
            debug!("pause() ignored: timer is {}.", core.state);
            return;
        }

        core.state = TimerState::Paused;
        core.halt_clock();
        info!("Timer paused with {}s remaining.", core.time_remaining);
        self.system_event_sender
            .send(SystemEvent::TimerPaused {
                remaining_seconds: core.time_remaining,
                at: Local::now(),
            })
            .ok();
    }

    /// Stops the clock and discards all progress, including the work count.
    pub async fn stop(&self) {
        let mut core = self.core.lock().await;
        core.state = TimerState::Stopped;
        core.halt_clock();
        core.reset();
        info!("Timer stopped and reset.");
        self.system_event_sender
            .send(SystemEvent::TimerStopped { at: Local::now() })
            .ok();
    }

    /// Returns to a fresh work session and clears the work count.
    ///
    /// The timer state is unchanged: a running timer keeps running from the
    /// top of the new work session.
    pub async fn reset(&self) {
        let mut core = self.core.lock().await;
        core.reset();
        info!("Timer reset to a fresh {} session.", core.current_session);
        self.system_event_sender
            .send(SystemEvent::TimerReset { at: Local::now() })
            .ok();
    }

    /// Installs the tick observer, replacing any previous one.
    ///
    /// Returns `true` if an earlier observer was discarded.
    pub async fn register_tick_callback(
        &self,
        observer: impl FnMut(&TimerSnapshot) + Send + 'static,
    ) -> bool {
        self.core.lock().await.tick_observer.replace(Box::new(observer))
    }

    /// Installs the completion observer, replacing any previous one.
    ///
    /// Returns `true` if an earlier observer was discarded.
    pub async fn register_completion_callback(
        &self,
        observer: impl FnMut(&SessionCompletion) + Send + 'static,
    ) -> bool {
        self.core
            .lock()
            .await
            .completion_observer
            .replace(Box::new(observer))
    }

    /// Removes the tick observer. Returns `true` if one was installed.
    pub async fn clear_tick_callback(&self) -> bool {
        self.core.lock().await.tick_observer.clear()
    }

    /// Removes the completion observer. Returns `true` if one was installed.
    pub async fn clear_completion_callback(&self) -> bool {
        self.core.lock().await.completion_observer.clear()
    }

    pub async fn state(&self) -> TimerState {
        self.core.lock().await.state
    }

    pub async fn current_session(&self) -> SessionType {
        self.core.lock().await.current_session
    }

    pub async fn time_remaining_seconds(&self) -> u64 {
        self.core.lock().await.time_remaining
    }

    pub async fn completed_work_sessions(&self) -> u32 {
        self.core.lock().await.completed_work_sessions
    }

    /// Reads every accessor at once, under a single lock.
    pub async fn snapshot(&self) -> TimerSnapshot {
        self.core.lock().await.snapshot()
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Subscribes to the `SystemEvent` stream.
    pub fn subscribe_system_events(&self) -> broadcast::Receiver<SystemEvent> {
        self.system_event_sender.subscribe()
    }
}

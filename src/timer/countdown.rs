//! Countdown state machine and its shared handle

use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, error, info, warn};

use super::{TimerSettings, TimerSnapshot, TimerState, TimerStatus, Transition};
use crate::{
    error::TimerError,
    runtime::{Clock, DisplaySink, Scheduler, TickFn, TickHandle},
};

/// Cloneable handle to one countdown.
///
/// All clones share the same state. Ticks registered with the scheduler hold
/// a weak reference to that state, so they always see the current values
/// and stop mattering once the last handle is dropped.
#[derive(Clone)]
pub struct Countdown {
    inner: Arc<Mutex<CountdownTimer>>,
}

impl Countdown {
    /// Create an idle countdown wired to its collaborators
    pub fn new<S>(
        settings: TimerSettings,
        scheduler: S,
        display: Arc<dyn DisplaySink>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        S: Scheduler + 'static,
    {
        let inner = Arc::new_cyclic(|this| {
            Mutex::new(CountdownTimer {
                state: TimerState::new(settings.total_ms()),
                settings,
                active_tick: None,
                registrations: 0,
                scheduler: Box::new(scheduler),
                display,
                clock,
                this: this.clone(),
            })
        });

        Self { inner }
    }

    /// Start or resume the countdown
    pub fn start(&self) -> Result<Transition, TimerError> {
        self.with_timer(CountdownTimer::start)
    }

    /// Pause a running countdown, keeping the remaining time
    pub fn pause(&self) -> Result<Transition, TimerError> {
        self.with_timer(CountdownTimer::pause)
    }

    /// Stop the countdown and restore the full duration
    pub fn reset(&self) -> Result<Transition, TimerError> {
        self.with_timer(CountdownTimer::reset)
    }

    /// Pause when running, start otherwise
    pub fn toggle(&self) -> Result<Transition, TimerError> {
        self.with_timer(CountdownTimer::toggle)
    }

    /// Apply one scheduled tick
    pub fn tick(&self) -> Result<Transition, TimerError> {
        self.with_timer(CountdownTimer::tick)
    }

    /// Remaining time as `MM:SS`
    pub fn formatted_remaining(&self) -> Result<String, TimerError> {
        self.with_timer(|timer| timer.state.formatted_remaining())
    }

    pub fn state(&self) -> Result<TimerState, TimerError> {
        self.with_timer(|timer| timer.state.clone())
    }

    pub fn status(&self) -> Result<TimerStatus, TimerError> {
        self.with_timer(|timer| timer.state.status)
    }

    /// Message configured for the current status
    pub fn message(&self) -> Result<String, TimerError> {
        self.with_timer(|timer| timer.message().to_string())
    }

    pub fn snapshot(&self) -> Result<TimerSnapshot, TimerError> {
        self.with_timer(|timer| TimerSnapshot::new(&timer.state, timer.message()))
    }

    pub fn settings(&self) -> Result<TimerSettings, TimerError> {
        self.with_timer(|timer| timer.settings.clone())
    }

    fn with_timer<T>(&self, f: impl FnOnce(&mut CountdownTimer) -> T) -> Result<T, TimerError> {
        let mut timer = self
            .inner
            .lock()
            .map_err(|e| TimerError::StateLock(e.to_string()))?;
        Ok(f(&mut timer))
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("Countdown");
        match self.inner.try_lock() {
            Ok(timer) => debug.field("state", &timer.state),
            Err(_) => debug.field("state", &"<locked>"),
        };
        debug.finish()
    }
}

/// The countdown state machine.
///
/// Only reachable through [`Countdown`]; every mutation goes through one of
/// the operations below.
struct CountdownTimer {
    settings: TimerSettings,
    state: TimerState,
    /// Registration number and scheduler handle of the live tick
    active_tick: Option<(u64, TickHandle)>,
    registrations: u64,
    scheduler: Box<dyn Scheduler>,
    display: Arc<dyn DisplaySink>,
    clock: Arc<dyn Clock>,
    this: Weak<Mutex<CountdownTimer>>,
}

impl CountdownTimer {
    fn start(&mut self) -> Transition {
        match self.state.status {
            TimerStatus::Running => {
                warn!("Start ignored: countdown is already running");
                return Transition::Ignored;
            }
            TimerStatus::Completed => {
                debug!("Start ignored: countdown completed, reset it first");
                return Transition::Ignored;
            }
            TimerStatus::Idle | TimerStatus::Paused => {}
        }

        self.registrations += 1;
        let registration = self.registrations;
        let on_tick = self.tick_callback(registration);
        let handle = self
            .scheduler
            .schedule_repeating(self.settings.tick_interval(), on_tick);
        self.active_tick = Some((registration, handle));
        self.state.status = TimerStatus::Running;
        self.state.last_tick_at = Some(self.clock.now());

        info!("Countdown started with {} remaining", self.state.formatted_remaining());
        self.announce_status();
        Transition::Applied
    }

    fn pause(&mut self) -> Transition {
        if self.state.status != TimerStatus::Running {
            debug!("Pause ignored while {}", self.state.status);
            return Transition::Ignored;
        }

        self.cancel_tick();
        self.state.status = TimerStatus::Paused;
        self.state.last_tick_at = None;

        info!("Countdown paused at {}", self.state.formatted_remaining());
        self.announce_status();
        Transition::Applied
    }

    fn reset(&mut self) -> Transition {
        self.cancel_tick();
        self.state.remaining_ms = self.state.total_ms;
        self.state.status = TimerStatus::Idle;
        self.state.last_tick_at = None;

        info!("Countdown reset to {}", self.state.formatted_remaining());
        self.announce_status();
        self.display.on_update(&self.state.formatted_remaining());
        Transition::Applied
    }

    fn toggle(&mut self) -> Transition {
        match self.state.status {
            TimerStatus::Running => self.pause(),
            TimerStatus::Idle | TimerStatus::Paused => self.start(),
            TimerStatus::Completed => {
                debug!("Toggle ignored: countdown completed, reset it first");
                Transition::Ignored
            }
        }
    }

    /// Tick delivered by the scheduler for one registration.
    ///
    /// Ticks from a cancelled registration are dropped even when a later
    /// `start` has the timer running again.
    fn tick_from(&mut self, registration: u64) -> Transition {
        match self.active_tick {
            Some((live, _)) if live == registration => self.tick(),
            _ => {
                debug!("Ignoring tick from cancelled registration {}", registration);
                Transition::Ignored
            }
        }
    }

    fn tick(&mut self) -> Transition {
        // A tick may already be in flight when pause or reset cancels it
        if self.state.status != TimerStatus::Running {
            debug!("Ignoring tick while {}", self.state.status);
            return Transition::Ignored;
        }

        self.state.remaining_ms = self
            .state
            .remaining_ms
            .saturating_sub(self.settings.tick_ms());

        if self.state.remaining_ms == 0 {
            self.cancel_tick();
            self.state.status = TimerStatus::Completed;
            self.state.last_tick_at = None;

            info!("Countdown completed");
            self.display.on_completed();
            self.announce_status();
        } else {
            self.state.last_tick_at = Some(self.clock.now());
            self.display.on_update(&self.state.formatted_remaining());
        }

        Transition::Applied
    }

    fn message(&self) -> &str {
        self.settings.messages().for_status(self.state.status)
    }

    fn announce_status(&self) {
        self.display.on_status(self.state.status, self.message());
    }

    fn cancel_tick(&mut self) {
        if let Some((_, handle)) = self.active_tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn tick_callback(&self, registration: u64) -> TickFn {
        let this = self.this.clone();
        Arc::new(move || {
            let Some(shared) = this.upgrade() else {
                return;
            };
            let locked = shared.lock();
            match locked {
                Ok(mut timer) => {
                    timer.tick_from(registration);
                }
                Err(e) => error!("Failed to lock timer state for tick: {}", e),
            };
        })
    }
}

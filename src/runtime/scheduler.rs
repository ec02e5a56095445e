//! Repeating tick schedulers

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

/// Callback invoked on every scheduled tick
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Identifies one repeating registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of periodic ticks.
///
/// Cancellation is cooperative: a callback that was already dispatched when
/// `cancel` ran may still be invoked once.
pub trait Scheduler: Send {
    /// Invoke `on_tick` every `interval`, starting one interval from now
    fn schedule_repeating(&mut self, interval: Duration, on_tick: TickFn) -> TickHandle;

    /// Stop a registration. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler backed by tokio interval tasks
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: Handle,
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Scheduler bound to the runtime of the calling task.
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Number of live registrations
    pub fn active(&self) -> usize {
        self.tasks.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&mut self, interval: Duration, on_tick: TickFn) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);

        let task = self.runtime.spawn(async move {
            let mut ticks = interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticks.tick().await;
                on_tick();
            }
        });

        debug!("Scheduled tick {} every {:?}", handle.id(), interval);
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!("Cancelled tick {}", handle.id());
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

#[derive(Default)]
struct ManualRegistry {
    next_id: u64,
    live: Vec<(TickHandle, Duration, TickFn)>,
}

/// Scheduler driven by hand, for deterministic tests and simulations.
///
/// Clones share one registry, so a clone kept outside the timer can fire
/// ticks into it.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    registry: Arc<Mutex<ManualRegistry>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one tick to every live registration, returning how many fired
    pub fn fire(&self) -> usize {
        let callbacks = self.pending_ticks();
        for callback in &callbacks {
            callback();
        }
        callbacks.len()
    }

    /// Deliver `count` rounds of ticks
    pub fn fire_n(&self, count: usize) {
        for _ in 0..count {
            self.fire();
        }
    }

    /// Callbacks of the live registrations.
    ///
    /// Holding on to these and invoking them after a cancel simulates a tick
    /// that was already in flight.
    pub fn pending_ticks(&self) -> Vec<TickFn> {
        self.lock()
            .live
            .iter()
            .map(|(_, _, callback)| Arc::clone(callback))
            .collect()
    }

    /// Number of live registrations
    pub fn active(&self) -> usize {
        self.lock().live.len()
    }

    /// Interval of the most recent live registration
    pub fn last_interval(&self) -> Option<Duration> {
        self.lock().live.last().map(|(_, interval, _)| *interval)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active", &self.active())
            .finish()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&mut self, interval: Duration, on_tick: TickFn) -> TickHandle {
        let mut registry = self.lock();
        registry.next_id += 1;
        let handle = TickHandle(registry.next_id);
        registry.live.push((handle, interval, on_tick));
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.lock().live.retain(|(live, _, _)| *live != handle);
    }
}

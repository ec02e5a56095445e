//! Display sinks receiving countdown notifications

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::timer::TimerStatus;

/// Receives notifications from a countdown.
///
/// Called while the timer state is locked; implementations must not call
/// back into the countdown.
pub trait DisplaySink: Send + Sync {
    /// The remaining time changed
    fn on_update(&self, remaining: &str);

    /// The countdown reached zero
    fn on_completed(&self);

    /// The status changed
    fn on_status(&self, _status: TimerStatus, _message: &str) {}
}

/// A single display notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DisplayEvent {
    Update { remaining: String },
    Status { status: TimerStatus, message: String },
    Completed,
}

/// Publishes display events on a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastDisplay {
    tx: broadcast::Sender<DisplayEvent>,
}

impl BroadcastDisplay {
    pub fn new(tx: broadcast::Sender<DisplayEvent>) -> Self {
        Self { tx }
    }

    /// Create a display with a fresh channel of the given capacity
    pub fn channel(capacity: usize) -> (Self, broadcast::Sender<DisplayEvent>) {
        let (tx, _) = broadcast::channel(capacity);
        (Self::new(tx.clone()), tx)
    }

    fn publish(&self, event: DisplayEvent) {
        // No subscribers is fine; nobody is watching yet
        if self.tx.send(event).is_err() {
            trace!("No display subscribers");
        }
    }
}

impl DisplaySink for BroadcastDisplay {
    fn on_update(&self, remaining: &str) {
        self.publish(DisplayEvent::Update {
            remaining: remaining.to_string(),
        });
    }

    fn on_completed(&self) {
        self.publish(DisplayEvent::Completed);
    }

    fn on_status(&self, status: TimerStatus, message: &str) {
        self.publish(DisplayEvent::Status {
            status,
            message: message.to_string(),
        });
    }
}

/// Keeps every notification in memory
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Remaining-time values received so far, in order
    pub fn updates(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DisplayEvent::Update { remaining } => Some(remaining),
                _ => None,
            })
            .collect()
    }

    pub fn completions(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, DisplayEvent::Completed))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn record(&self, event: DisplayEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

impl DisplaySink for RecordingDisplay {
    fn on_update(&self, remaining: &str) {
        self.record(DisplayEvent::Update {
            remaining: remaining.to_string(),
        });
    }

    fn on_completed(&self) {
        self.record(DisplayEvent::Completed);
    }

    fn on_status(&self, status: TimerStatus, message: &str) {
        self.record(DisplayEvent::Status {
            status,
            message: message.to_string(),
        });
    }
}

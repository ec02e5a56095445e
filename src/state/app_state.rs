//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::{
    runtime::{BroadcastDisplay, DisplayEvent, SystemClock, TokioScheduler},
    timer::{Countdown, TimerSettings},
};

/// Capacity of the display event channel
const DISPLAY_CHANNEL_CAPACITY: usize = 100;

/// State shared by the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// The countdown being controlled
    pub countdown: Countdown,
    /// Display notifications published by the countdown
    pub display_tx: broadcast::Sender<DisplayEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create the production state: tokio ticks, broadcast display, system clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(settings: TimerSettings, host: String, port: u16) -> Self {
        let (display, display_tx) = BroadcastDisplay::channel(DISPLAY_CHANNEL_CAPACITY);
        let countdown = Countdown::new(
            settings,
            TokioScheduler::current(),
            Arc::new(display),
            Arc::new(SystemClock),
        );

        Self::with_countdown(countdown, display_tx, host, port)
    }

    /// Wrap an already wired countdown
    pub fn with_countdown(
        countdown: Countdown,
        display_tx: broadcast::Sender<DisplayEvent>,
        host: String,
        port: u16,
    ) -> Self {
        Self {
            countdown,
            display_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Remember the most recent control action
    pub fn record_action(&self, action: &str) {
        match self.last_action.lock() {
            Ok(mut last_action) => {
                *last_action = Some((action.to_string(), Utc::now()));
                info!("Control action: {}", action);
            }
            Err(e) => warn!("Failed to record action {}: {}", action, e),
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|last| last.clone()) {
            Some((action, at)) => (Some(action), Some(at)),
            None => (None, None),
        }
    }

    /// Subscribe to display notifications
    pub fn subscribe_display(&self) -> broadcast::Receiver<DisplayEvent> {
        self.display_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed().as_secs())
    }
}

fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

//! Timer configuration: duration, tick interval and status messages

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TimerStatus;
use crate::error::TimerError;

/// Default pomodoro length in minutes
pub const DEFAULT_POMODORO_MINUTES: u64 = 25;
/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Messages shown alongside the countdown for each status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerMessages {
    pub start: String,
    pub running: String,
    pub paused: String,
    pub completed: String,
}

impl TimerMessages {
    /// Message for the given status
    pub fn for_status(&self, status: TimerStatus) -> &str {
        match status {
            TimerStatus::Idle => &self.start,
            TimerStatus::Running => &self.running,
            TimerStatus::Paused => &self.paused,
            TimerStatus::Completed => &self.completed,
        }
    }
}

impl Default for TimerMessages {
    fn default() -> Self {
        Self {
            start: "Let the countdown begin!".to_string(),
            running: "Keep going!".to_string(),
            paused: "Continue!".to_string(),
            completed: "Congratulations!".to_string(),
        }
    }
}

/// Validated parameters of a countdown.
///
/// Both the duration and the tick interval are strictly positive. The tick
/// interval is also the fixed amount subtracted on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSettings {
    total_ms: u64,
    tick_ms: u64,
    messages: TimerMessages,
}

impl TimerSettings {
    /// Create settings for a countdown of `total`, ticking once per second
    pub fn new(total: Duration) -> Result<Self, TimerError> {
        let total_ms = duration_to_ms(total)?;
        if total_ms == 0 {
            return Err(TimerError::ZeroDuration);
        }

        Ok(Self {
            total_ms,
            tick_ms: DEFAULT_TICK_MS,
            messages: TimerMessages::default(),
        })
    }

    /// Create settings from a millisecond count
    pub fn from_millis(total_ms: u64) -> Result<Self, TimerError> {
        Self::new(Duration::from_millis(total_ms))
    }

    /// A standard 25 minute pomodoro
    pub fn pomodoro() -> Self {
        Self {
            total_ms: DEFAULT_POMODORO_MINUTES * 60 * 1000,
            tick_ms: DEFAULT_TICK_MS,
            messages: TimerMessages::default(),
        }
    }

    /// Replace the tick interval
    pub fn with_tick_interval(mut self, interval: Duration) -> Result<Self, TimerError> {
        let tick_ms = duration_to_ms(interval)?;
        if tick_ms == 0 {
            return Err(TimerError::ZeroTickInterval);
        }
        self.tick_ms = tick_ms;
        Ok(self)
    }

    /// Replace the status messages
    pub fn with_messages(mut self, messages: TimerMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn messages(&self) -> &TimerMessages {
        &self.messages
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::pomodoro()
    }
}

fn duration_to_ms(duration: Duration) -> Result<u64, TimerError> {
    u64::try_from(duration.as_millis()).map_err(|_| TimerError::DurationTooLong)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pomodoro_defaults() {
        let settings = TimerSettings::pomodoro();
        assert_eq!(settings.total_ms(), 1_500_000);
        assert_eq!(settings.tick_ms(), 1000);
        assert_eq!(settings.messages().start, "Let the countdown begin!");
    }

    #[test]
    fn test_rejects_zero_values() {
        assert_eq!(TimerSettings::from_millis(0), Err(TimerError::ZeroDuration));
        assert_eq!(
            TimerSettings::from_millis(5000).and_then(|s| s.with_tick_interval(Duration::ZERO)),
            Err(TimerError::ZeroTickInterval)
        );
    }

    #[test]
    fn test_rejects_overflowing_duration() {
        assert_eq!(TimerSettings::new(Duration::MAX), Err(TimerError::DurationTooLong));
    }

    #[test]
    fn test_messages_by_status() {
        let messages = TimerMessages::default();
        assert_eq!(messages.for_status(TimerStatus::Running), "Keep going!");
        assert_eq!(messages.for_status(TimerStatus::Paused), "Continue!");
        assert_eq!(messages.for_status(TimerStatus::Completed), "Congratulations!");
    }
}

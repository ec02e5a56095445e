//! Timer state structure and read models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::format::format_mmss;

/// Lifecycle status of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    /// Reached zero; left only through a reset
    Completed,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a timer operation.
///
/// Operations invoked in a state that does not support them are ignored
/// rather than reported as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Applied,
    Ignored,
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Mutable state of one countdown.
///
/// Holds `remaining_ms <= total_ms`, and `last_tick_at` is set exactly when
/// the status is `Running`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub remaining_ms: u64,
    pub status: TimerStatus,
    pub total_ms: u64,
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl TimerState {
    /// Create an idle state with the full duration remaining
    pub fn new(total_ms: u64) -> Self {
        Self {
            remaining_ms: total_ms,
            status: TimerStatus::Idle,
            total_ms,
            last_tick_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status == TimerStatus::Completed
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.total_ms - self.remaining_ms
    }

    /// Fraction of the countdown already spent, from 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms() as f64 / self.total_ms as f64
    }

    pub fn formatted_remaining(&self) -> String {
        format_mmss(self.remaining_ms)
    }
}

/// Serializable view of a countdown, as served by the status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub remaining_ms: u64,
    pub total_ms: u64,
    pub elapsed_ms: u64,
    pub progress: f64,
    pub formatted: String,
    pub message: String,
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl TimerSnapshot {
    pub fn new(state: &TimerState, message: &str) -> Self {
        Self {
            status: state.status,
            remaining_ms: state.remaining_ms,
            total_ms: state.total_ms,
            elapsed_ms: state.elapsed_ms(),
            progress: state.progress(),
            formatted: state.formatted_remaining(),
            message: message.to_string(),
            last_tick_at: state.last_tick_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_full() {
        let state = TimerState::new(65_000);
        assert_eq!(state.status, TimerStatus::Idle);
        assert_eq!(state.remaining_ms, 65_000);
        assert!(state.last_tick_at.is_none());
        assert_eq!(state.formatted_remaining(), "01:05");
    }

    #[test]
    fn test_progress() {
        let mut state = TimerState::new(100_000);
        assert_eq!(state.progress(), 0.0);

        state.remaining_ms = 50_000;
        assert!((state.progress() - 0.5).abs() < f64::EPSILON);
        assert_eq!(state.elapsed_ms(), 50_000);
    }

    #[test]
    fn test_snapshot_serializes_lowercase_status() {
        let snapshot = TimerSnapshot::new(&TimerState::new(5000), "ready");
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["formatted"], "00:05");
        assert_eq!(json["message"], "ready");
    }
}

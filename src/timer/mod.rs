//! Countdown timer
//!
//! One parameterized countdown state machine with start, pause, reset and
//! tick operations, plus the settings and read models around it.

pub mod countdown;
pub mod format;
pub mod settings;
pub mod state;

pub use countdown::Countdown;
pub use format::{format_mmss, parse_duration};
pub use settings::{TimerMessages, TimerSettings};
pub use state::{TimerSnapshot, TimerState, TimerStatus, Transition};

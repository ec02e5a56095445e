//! Error types for timer construction and shared state access

use thiserror::Error;

/// Errors raised while building or accessing a countdown timer.
///
/// Invoking an operation in a state that does not support it is not an
/// error; see [`crate::timer::Transition`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("countdown duration must be greater than zero")]
    ZeroDuration,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("duration is too long to be expressed in milliseconds")]
    DurationTooLong,

    #[error("failed to lock timer state: {0}")]
    StateLock(String),
}

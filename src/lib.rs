//! Pomodoro Timer - A countdown timer daemon controlled over HTTP
//!
//! The core is a single countdown state machine ([`timer::Countdown`]) that
//! owns no I/O: ticks come from a scheduler, timestamps from a clock, and
//! every visible change goes to a display sink. The HTTP API and background
//! tasks wire it to tokio, axum and tracing.

pub mod api;
pub mod config;
pub mod error;
pub mod runtime;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::TimerError;
pub use state::AppState;
pub use timer::{Countdown, TimerSettings, TimerStatus, Transition};
pub use utils::signals::shutdown_signal;

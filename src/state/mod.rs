//! State management module
//!
//! Holds the state shared between the HTTP handlers and background tasks.

pub mod app_state;

pub use app_state::AppState;

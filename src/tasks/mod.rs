//! Background tasks module
//!
//! Tasks that run alongside the HTTP server.

pub mod display_log;

pub use display_log::display_log_task;

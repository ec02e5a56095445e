//! Collaborators that drive and observe a countdown
//!
//! A countdown owns no I/O. Ticks come from a [`Scheduler`], timestamps from
//! a [`Clock`], and every visible change goes to a [`DisplaySink`].

pub mod clock;
pub mod display;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{BroadcastDisplay, DisplayEvent, DisplaySink, RecordingDisplay};
pub use scheduler::{ManualScheduler, Scheduler, TickFn, TickHandle, TokioScheduler};

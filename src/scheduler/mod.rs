//! Scheduling for toast countdowns.
//!
//! This module contains the time-based machinery:
//! - `clock`: millisecond clocks (tokio-backed and manual)
//! - `timer`: timer engine with pause/resume and expiry
//! - `driver`: tokio task that ticks the service on a fixed interval

pub mod clock;
pub mod driver;
pub mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use driver::{spawn_driver, DriverHandle};
pub use timer::{CountdownState, TimerEngine, TimerEvent, Transition};

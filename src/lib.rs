//! Toastline Library
//!
//! In-process registry of short-lived toast notifications. Each toast runs
//! an independent countdown that can be paused while the user interacts
//! with it and is removed automatically once it expires.
//! It includes:
//! - Notification store with insertion-ordered snapshots
//! - Timer engine with pause/resume and expiry
//! - Tokio tick driver
//! - Service façade with snapshot subscriptions and a process-wide handle
//! - CLI display and session utilities

pub mod cli;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use config::ToastConfig;
pub use error::ToastError;
pub use scheduler::{
    spawn_driver, Clock, CountdownState, DriverHandle, ManualClock, MonotonicClock, TimerEngine,
    TimerEvent,
};
pub use service::{NotificationService, Subscription};
pub use store::{IdGenerator, NotificationStore};
pub use types::{
    EnqueueRequest, Notification, NotificationId, NotificationKind, NotificationSpec,
};

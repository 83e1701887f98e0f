//! Tick driver for the notification service.
//!
//! One shared tokio task re-evaluates every countdown on a fixed interval,
//! so expiry is detected within one tick of the true deadline.

use std::sync::{Arc, Weak};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

use crate::error::ToastError;
use crate::service::NotificationService;

/// Handle to a running tick driver. Dropping it stops the driver.
#[derive(Debug)]
pub struct DriverHandle {
    task: JoinHandle<()>,
}

impl DriverHandle {
    /// Stops the driver.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Returns true once the driver task has ended.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawns the tick driver on the current tokio runtime.
///
/// The driver only holds a weak reference and ends by itself once the
/// service is dropped.
///
/// # Errors
///
/// Returns `ToastError::NoRuntime` when called outside a tokio runtime.
pub fn spawn_driver(service: &Arc<NotificationService>) -> Result<DriverHandle, ToastError> {
    let runtime = Handle::try_current().map_err(|_| ToastError::NoRuntime)?;
    let period = service.config().tick_interval();
    let task = runtime.spawn(run(Arc::downgrade(service), period));
    tracing::debug!(period_ms = period.as_millis() as u64, "tick driver started");
    Ok(DriverHandle { task })
}

/// Runs the tick loop until the service is gone.
async fn run(service: Weak<NotificationService>, period: Duration) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let Some(service) = service.upgrade() else {
            tracing::debug!("notification service dropped, tick driver exiting");
            break;
        };
        service.tick();
    }
}

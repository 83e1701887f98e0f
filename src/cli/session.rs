//! Terminal session driving the process-wide notification service.
//!
//! A session installs the service, spawns the tick driver, renders
//! snapshots and events, and shuts everything down once no toast is left.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::time::{interval, sleep, Duration, MissedTickBehavior};

use crate::config::ToastConfig;
use crate::scheduler::{spawn_driver, DriverHandle, MonotonicClock, TimerEvent};
use crate::service::{self, NotificationService, Subscription};
use crate::types::{EnqueueRequest, NotificationId, NotificationKind};

use super::commands::ShowArgs;
use super::display::Display;

/// Interval between progress renders in text mode.
const RENDER_INTERVAL_MS: u64 = 500;

/// A running terminal session.
pub struct Session {
    service: Arc<NotificationService>,
    events: mpsc::UnboundedReceiver<TimerEvent>,
    json: bool,
    _driver: DriverHandle,
    _subscription: Subscription,
}

impl Session {
    /// Installs the process-wide service and starts the tick driver.
    ///
    /// The service stays installed until the session is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a service is
    /// already installed, or no tokio runtime is available.
    pub fn start(config: ToastConfig, json: bool) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let (notifications, events) =
            NotificationService::with_events(config, Arc::new(MonotonicClock::new()));
        let notifications = Arc::new(notifications);

        let driver = spawn_driver(&notifications).context("Failed to start tick driver")?;
        let subscription = notifications.subscribe(move |items| {
            if json || !items.is_empty() {
                Display::show_snapshot(items, json);
            }
        });
        // Installed last so a failed start leaves no handle behind.
        service::install(Arc::clone(&notifications))
            .context("Failed to install notification service")?;

        Ok(Self {
            service: notifications,
            events,
            json,
            _driver: driver,
            _subscription: subscription,
        })
    }

    /// The installed service.
    pub fn service(&self) -> &Arc<NotificationService> {
        &self.service
    }

    /// Renders events until no toast is left or Ctrl-C is pressed.
    pub async fn wait_until_empty(&mut self) -> Result<()> {
        let mut render = interval(Duration::from_millis(RENDER_INTERVAL_MS));
        render.set_missed_tick_behavior(MissedTickBehavior::Skip);
        render.tick().await;

        loop {
            tokio::select! {
                event = self.events.recv() => {
                    let Some(event) = event else { break };
                    if !self.json {
                        Display::show_event(&event);
                    }
                    let removal = matches!(event, TimerEvent::Expired { .. } | TimerEvent::Closed { .. });
                    if removal && self.service.is_empty() {
                        break;
                    }
                }
                _ = render.tick(), if !self.json => {
                    let items = self.service.list();
                    if !items.is_empty() {
                        Display::show_snapshot(&items, false);
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal.context("Failed to listen for Ctrl-C")?;
                    tracing::info!("interrupted, closing all toasts");
                    self.service.close_all();
                    break;
                }
            }
        }

        Ok(())
    }

    /// Tears down the process-wide service.
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if service::shutdown() {
            tracing::debug!("session closed, service uninstalled");
        }
    }
}

/// Schedules a simulated pointer hover over a toast.
fn spawn_hover(id: NotificationId, start_after_ms: u64, hold_ms: u64) {
    tokio::spawn(async move {
        sleep(Duration::from_millis(start_after_ms)).await;
        if let Err(e) = service::report_interaction_start(id) {
            tracing::warn!(%id, "hover start failed: {}", e);
            return;
        }
        sleep(Duration::from_millis(hold_ms)).await;
        if let Err(e) = service::report_interaction_end(id) {
            tracing::warn!(%id, "hover end failed: {}", e);
        }
    });
}

/// Schedules an early close of a toast.
fn spawn_close(id: NotificationId, after_ms: u64) {
    tokio::spawn(async move {
        sleep(Duration::from_millis(after_ms)).await;
        if let Err(e) = service::close(id) {
            tracing::warn!(%id, "close failed: {}", e);
        }
    });
}

/// Runs the `show` command.
pub async fn run_show(config: ToastConfig, args: &ShowArgs, json: bool) -> Result<()> {
    let mut session = Session::start(config, json)?;

    let mut request = EnqueueRequest::new(NotificationKind::from(args.kind.as_str()), &args.message);
    request.duration_ms = args.duration;
    request.title = args.title.clone();
    let id = session.service().enqueue_request(request);

    if let Some((at, hold)) = args.hover() {
        spawn_hover(id, at, hold);
    }

    let result = session.wait_until_empty().await;
    session.finish();
    result
}

/// Runs the `demo` command.
pub async fn run_demo(config: ToastConfig, json: bool) -> Result<()> {
    let mut session = Session::start(config, json)?;

    service::enqueue(NotificationKind::Success, "Quiz saved", Some(1500))?;
    service::enqueue(NotificationKind::Info, "Loading results", None)?;
    let hovered = service::enqueue(NotificationKind::Warning, "Unsaved answers", Some(2000))?;
    let closed = service::enqueue(NotificationKind::Error, "Upload failed", Some(4000))?;
    service::enqueue("bogus-kind", "Shown as info", Some(1000))?;

    spawn_hover(hovered, 500, 1000);
    spawn_close(closed, 1000);

    let result = session.wait_until_empty().await;
    session.finish();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToastError;

    #[tokio::test]
    async fn test_dropping_session_uninstalls_service() {
        let session = Session::start(ToastConfig::default(), true).unwrap();
        let installed = service::handle().unwrap();
        assert!(Arc::ptr_eq(&installed, session.service()));

        // A second session cannot start while the first is live.
        assert!(Session::start(ToastConfig::default(), true).is_err());
        assert!(service::handle().is_ok());

        // Dropped without finish, as on an early `?` return.
        drop(session);
        assert_eq!(service::handle().unwrap_err(), ToastError::NotInitialized);

        let again = Session::start(ToastConfig::default(), true).unwrap();
        again.finish();
        assert_eq!(service::handle().unwrap_err(), ToastError::NotInitialized);
    }
}

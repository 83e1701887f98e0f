//! Process-wide service handle.
//!
//! One `NotificationService` exists per running application. It is created
//! with [`init`] (or [`install`]) during startup and torn down with
//! [`shutdown`]. Every free function here fails with
//! `ToastError::NotInitialized` when no handle exists.

use std::sync::{Arc, PoisonError, RwLock};

use super::{NotificationService, Subscription};
use crate::config::ToastConfig;
use crate::error::ToastError;
use crate::types::{Notification, NotificationId, NotificationKind};

static GLOBAL: RwLock<Option<Arc<NotificationService>>> = RwLock::new(None);

/// Creates the process-wide service.
///
/// # Errors
///
/// Returns `Config` if the configuration is invalid and `AlreadyInitialized`
/// if a service already exists.
pub fn init(config: ToastConfig) -> Result<Arc<NotificationService>, ToastError> {
    config.validate()?;
    let service = Arc::new(NotificationService::new(config));
    install(Arc::clone(&service))?;
    Ok(service)
}

/// Installs an already constructed service as the process-wide one.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if a service already exists.
pub fn install(service: Arc<NotificationService>) -> Result<(), ToastError> {
    let mut slot = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return Err(ToastError::AlreadyInitialized);
    }
    *slot = Some(service);
    tracing::debug!("notification service initialized");
    Ok(())
}

/// Returns the process-wide service.
///
/// # Errors
///
/// Returns `NotInitialized` if [`init`] has not been called.
pub fn handle() -> Result<Arc<NotificationService>, ToastError> {
    GLOBAL
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or(ToastError::NotInitialized)
}

/// Tears down the process-wide service, closing all of its notifications.
///
/// Returns false if no service existed.
pub fn shutdown() -> bool {
    let service = GLOBAL
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take();

    match service {
        Some(service) => {
            let closed = service.close_all();
            tracing::debug!(closed = closed.len(), "notification service shut down");
            true
        }
        None => false,
    }
}

/// Enqueues a notification on the process-wide service.
pub fn enqueue(
    kind: impl Into<NotificationKind>,
    message: impl Into<String>,
    duration_ms: Option<i64>,
) -> Result<NotificationId, ToastError> {
    Ok(handle()?.enqueue(kind, message, duration_ms))
}

/// Closes a notification on the process-wide service.
pub fn close(id: NotificationId) -> Result<(), ToastError> {
    handle()?.close(id);
    Ok(())
}

/// Pauses a countdown on the process-wide service.
pub fn report_interaction_start(id: NotificationId) -> Result<(), ToastError> {
    handle()?.report_interaction_start(id);
    Ok(())
}

/// Resumes a countdown on the process-wide service.
pub fn report_interaction_end(id: NotificationId) -> Result<(), ToastError> {
    handle()?.report_interaction_end(id);
    Ok(())
}

/// Subscribes to list changes on the process-wide service.
pub fn subscribe<F>(listener: F) -> Result<Subscription, ToastError>
where
    F: Fn(&[Notification]) + Send + Sync + 'static,
{
    Ok(handle()?.subscribe(listener))
}

/// Snapshot of the process-wide service's active notifications.
pub fn list() -> Result<Vec<Notification>, ToastError> {
    Ok(handle()?.list())
}

//! Notification service façade.
//!
//! `NotificationService` is the only entry point collaborators use. It owns
//! the store and the timer engine behind one lock, so every create, tick,
//! pause, resume and removal is applied in sequence.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use toastline::config::ToastConfig;
//! use toastline::scheduler::ManualClock;
//! use toastline::service::NotificationService;
//!
//! let clock = Arc::new(ManualClock::new());
//! let service = NotificationService::with_clock(ToastConfig::default(), clock.clone());
//!
//! let id = service.enqueue("success", "Saved", Some(1000));
//! assert_eq!(service.progress(id), Some(100.0));
//!
//! clock.advance(1000);
//! service.tick();
//! assert!(service.list().is_empty());
//! ```

mod global;
mod subscription;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

pub use self::global::{
    close, enqueue, handle, init, install, list, report_interaction_end,
    report_interaction_start, shutdown, subscribe,
};
pub use self::subscription::{Listener, Subscription};

use self::subscription::ListenerRegistry;
use crate::config::ToastConfig;
use crate::scheduler::{Clock, CountdownState, MonotonicClock, TimerEngine, TimerEvent, Transition};
use crate::store::NotificationStore;
use crate::types::{EnqueueRequest, Notification, NotificationId, NotificationKind, NotificationSpec};

/// Store and engine, mutated together.
#[derive(Debug)]
struct Registry {
    store: NotificationStore,
    engine: TimerEngine,
}

/// Registry of active toast notifications with pausable countdowns.
#[derive(Debug)]
pub struct NotificationService {
    config: ToastConfig,
    clock: Arc<dyn Clock>,
    registry: Mutex<Registry>,
    listeners: Arc<ListenerRegistry>,
}

impl NotificationService {
    /// Creates a service on the tokio-backed monotonic clock.
    pub fn new(config: ToastConfig) -> Self {
        Self::with_clock(config, Arc::new(MonotonicClock::new()))
    }

    /// Creates a service on the given clock.
    pub fn with_clock(config: ToastConfig, clock: Arc<dyn Clock>) -> Self {
        Self::build(config, clock, TimerEngine::new())
    }

    /// Creates a service that also reports countdown transitions on a channel.
    pub fn with_events(
        config: ToastConfig,
        clock: Arc<dyn Clock>,
    ) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::build(config, clock, TimerEngine::with_events(tx)), rx)
    }

    fn build(config: ToastConfig, clock: Arc<dyn Clock>, engine: TimerEngine) -> Self {
        Self {
            config,
            clock,
            registry: Mutex::new(Registry {
                store: NotificationStore::new(),
                engine,
            }),
            listeners: Arc::new(ListenerRegistry::default()),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Enqueues a notification and starts its countdown.
    ///
    /// Never fails: unknown kinds become `Info`, and missing or non-positive
    /// durations use the configured default.
    pub fn enqueue(
        &self,
        kind: impl Into<NotificationKind>,
        message: impl Into<String>,
        duration_ms: Option<i64>,
    ) -> NotificationId {
        self.enqueue_request(EnqueueRequest {
            kind: kind.into(),
            message: message.into(),
            title: None,
            duration_ms,
        })
    }

    /// Enqueues a notification described by a request.
    pub fn enqueue_request(&self, request: EnqueueRequest) -> NotificationId {
        let duration_ms = self.config.normalize_duration(request.duration_ms);
        let mut spec = NotificationSpec::new(request.kind, request.message, duration_ms);
        if let Some(title) = request.title {
            spec.title = title;
        }

        let id = {
            let mut registry = self.registry();
            let now = self.clock.now_ms();
            let Registry { store, engine } = &mut *registry;
            let id = store.create(spec, now);
            engine.register(id, duration_ms, now);
            id
        };

        tracing::info!(%id, kind = %request.kind, duration_ms, "notification enqueued");
        self.publish();
        id
    }

    /// Removes a notification. Unknown or already removed ids are ignored.
    pub fn close(&self, id: NotificationId) {
        let closed = {
            let mut registry = self.registry();
            let Registry { store, engine } = &mut *registry;
            engine.close(store, id).is_some()
        };

        if closed {
            self.publish();
        } else {
            tracing::debug!(%id, "close ignored for inactive notification");
        }
    }

    /// Removes every notification.
    pub fn close_all(&self) -> Vec<NotificationId> {
        let removed = {
            let mut registry = self.registry();
            let Registry { store, engine } = &mut *registry;
            engine.clear(store)
        };

        if !removed.is_empty() {
            self.publish();
        }
        removed
    }

    /// Pauses a countdown while the user interacts with the notification.
    pub fn report_interaction_start(&self, id: NotificationId) {
        self.apply(id, |engine, store, now| engine.pause(store, id, now));
    }

    /// Resumes a countdown once the interaction ends.
    pub fn report_interaction_end(&self, id: NotificationId) {
        self.apply(id, |engine, store, now| engine.resume(store, id, now));
    }

    /// Re-evaluates every countdown. Returns the ids that expired.
    pub fn tick(&self) -> Vec<NotificationId> {
        let expired = {
            let mut registry = self.registry();
            let now = self.clock.now_ms();
            let Registry { store, engine } = &mut *registry;
            engine.tick(store, now)
        };

        if !expired.is_empty() {
            self.publish();
        }
        expired
    }

    /// Snapshot of the active notifications in insertion order.
    pub fn list(&self) -> Vec<Notification> {
        self.registry().store.list()
    }

    /// Snapshot of one notification with its elapsed time brought up to date.
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        let registry = self.registry();
        let mut item = registry.store.get(id)?.clone();
        if let Some(elapsed) = registry.engine.elapsed(id, self.clock.now_ms()) {
            item.elapsed_active_ms = elapsed;
        }
        Some(item)
    }

    /// Live remaining-lifetime percentage, or `None` if the id is not active.
    pub fn progress(&self, id: NotificationId) -> Option<f64> {
        self.registry().engine.progress(id, self.clock.now_ms())
    }

    /// Countdown state of a notification; unknown ids are `Removed`.
    pub fn state(&self, id: NotificationId) -> CountdownState {
        self.registry().engine.state(id)
    }

    /// Number of active notifications.
    pub fn len(&self) -> usize {
        self.registry().store.len()
    }

    /// Returns true if no notification is active.
    pub fn is_empty(&self) -> bool {
        self.registry().store.is_empty()
    }

    /// Registers a listener for list changes (insert and remove).
    ///
    /// The listener is called once right away with the current snapshot and
    /// then with the full ordered snapshot after every change. Snapshots are
    /// read at delivery time, so once every caller has returned the last one a
    /// listener saw equals `list()`. Changes racing with a delivery may be
    /// coalesced into one snapshot.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let subscription = self.listeners.add(Arc::new(listener));
        self.listeners.flush(|| self.list());
        subscription
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn apply<F>(&self, id: NotificationId, op: F)
    where
        F: FnOnce(&mut TimerEngine, &mut NotificationStore, u64) -> Option<Transition>,
    {
        let outcome = {
            let mut registry = self.registry();
            let now = self.clock.now_ms();
            let Registry { store, engine } = &mut *registry;
            op(engine, store, now)
        };

        match outcome {
            Some(transition) if transition.is_removal() => self.publish(),
            Some(_) => {}
            None => tracing::trace!(%id, "interaction ignored"),
        }
    }

    /// Notifies listeners after an insert or remove. Must run outside the lock.
    fn publish(&self) {
        self.listeners.publish(|| self.list());
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Tests
// ============================================================================

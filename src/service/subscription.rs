//! Snapshot listeners.
//!
//! Deliveries are serialized: one caller at a time runs the delivery loop,
//! and every round reads the snapshot fresh after claiming the pending
//! listeners. Changes made during a round (by a listener or another thread)
//! mark listeners pending again, so the last snapshot each listener sees
//! matches the store once all callers return.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::types::Notification;

/// Callback receiving the full ordered list of active notifications.
pub type Listener = Arc<dyn Fn(&[Notification]) + Send + Sync>;

struct Entry {
    key: u64,
    listener: Listener,
    pending: AtomicBool,
}

/// Registered listeners, in subscription order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_key: AtomicU64,
    entries: Mutex<Vec<Arc<Entry>>>,
    delivering: AtomicBool,
}

/// Releases the delivery flag, also when a listener panics.
struct DeliveryGuard<'a>(&'a AtomicBool);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ListenerRegistry {
    /// Adds a listener. It is pending until the next `flush`.
    pub(crate) fn add(self: &Arc<Self>, listener: Listener) -> Subscription {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        self.entries().push(Arc::new(Entry {
            key,
            listener,
            pending: AtomicBool::new(true),
        }));
        Subscription {
            registry: Arc::downgrade(self),
            key,
        }
    }

    fn remove(&self, key: u64) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|e| e.key != key);
        entries.len() < before
    }

    /// Marks every listener pending and delivers the current snapshot.
    ///
    /// If another call is already delivering (on this thread or another),
    /// this returns at once and that call delivers on its next round.
    pub(crate) fn publish<F>(&self, read: F)
    where
        F: Fn() -> Vec<Notification>,
    {
        for entry in self.entries().iter() {
            entry.pending.store(true, Ordering::SeqCst);
        }
        self.flush(read);
    }

    /// Delivers a fresh snapshot to every pending listener.
    pub(crate) fn flush<F>(&self, read: F)
    where
        F: Fn() -> Vec<Notification>,
    {
        while self
            .delivering
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            {
                let _guard = DeliveryGuard(&self.delivering);
                loop {
                    let targets = self.claim_pending();
                    if targets.is_empty() {
                        break;
                    }
                    // Read after claiming: a later change re-marks its targets.
                    let snapshot = read();
                    for entry in targets {
                        (entry.listener)(&snapshot);
                    }
                }
            }

            // A change may have landed between the last claim and the release.
            if !self.has_pending() {
                break;
            }
        }
    }

    fn claim_pending(&self) -> Vec<Arc<Entry>> {
        self.entries()
            .iter()
            .filter(|e| e.pending.swap(false, Ordering::SeqCst))
            .cloned()
            .collect()
    }

    fn has_pending(&self) -> bool {
        self.entries()
            .iter()
            .any(|e| e.pending.load(Ordering::SeqCst))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Arc<Entry>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a listener attached. Dropping it unsubscribes.
#[derive(Debug)]
#[must_use = "dropping a Subscription immediately detaches its listener"]
pub struct Subscription {
    registry: Weak<ListenerRegistry>,
    key: u64,
}

impl Subscription {
    /// Detaches the listener.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }

    /// Keeps the listener attached for as long as the service lives.
    pub fn detach(self) {
        std::mem::forget(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.key);
        }
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .field("delivering", &self.delivering.load(Ordering::Relaxed))
            .finish()
    }
}

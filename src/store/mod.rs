//! Notification store.
//!
//! The store is the single source of truth for active notifications:
//! - Insertion-ordered collection of `Notification` snapshots
//!   (ids only grow, so insertion order is also ascending id order)
//! - Idempotent removal (expiry and explicit close may race)
//! - Timer-only mutation of elapsed time and pause flag via `update`

mod id;

pub use id::IdGenerator;

use crate::types::{Notification, NotificationId, NotificationSpec};

// ============================================================================
// TimerPatch
// ============================================================================

/// Fields the timer engine is allowed to change on a stored notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TimerPatch {
    pub elapsed_active_ms: Option<u64>,
    pub paused: Option<bool>,
}

// ============================================================================
// NotificationStore
// ============================================================================

/// Ordered collection of active notifications.
#[derive(Debug)]
pub struct NotificationStore {
    items: Vec<Notification>,
    ids: &'static IdGenerator,
}

impl NotificationStore {
    /// Creates an empty store backed by the process-wide id generator.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: IdGenerator::process(),
        }
    }

    /// Appends a new running notification and returns its id.
    pub fn create(&mut self, spec: NotificationSpec, created_at_ms: u64) -> NotificationId {
        let id = self.ids.next();
        debug_assert!(self.items.last().is_none_or(|last| last.id < id));
        self.items.push(Notification::new(id, spec, created_at_ms));
        id
    }

    /// Removes the notification with the given id.
    ///
    /// Returns false (and does nothing) if the id is not present.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Snapshot of the active notifications in insertion order.
    pub fn list(&self) -> Vec<Notification> {
        self.items.clone()
    }

    /// Returns a notification by id.
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.position(id).map(|pos| &self.items[pos])
    }

    /// Returns true if the id is present.
    pub fn contains(&self, id: NotificationId) -> bool {
        self.position(id).is_some()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<NotificationId> {
        self.items.iter().map(|n| n.id).collect()
    }

    /// Number of active notifications.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no notification is active.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies a timer patch. Returns false if the id is not present.
    pub(crate) fn update(&mut self, id: NotificationId, patch: TimerPatch) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        let item = &mut self.items[pos];
        if let Some(elapsed) = patch.elapsed_active_ms {
            item.elapsed_active_ms = elapsed.min(item.duration_ms);
        }
        if let Some(paused) = patch.paused {
            item.paused = paused;
        }
        true
    }

    /// Removes every notification, returning the removed ids in order.
    pub(crate) fn drain(&mut self) -> Vec<NotificationId> {
        self.items.drain(..).map(|n| n.id).collect()
    }

    fn position(&self, id: NotificationId) -> Option<usize> {
        self.items.binary_search_by_key(&id, |n| n.id).ok()
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Timer engine for toast countdowns.
//!
//! This module provides the per-notification countdown logic:
//! - State transitions (Running ⇄ Paused → Removed)
//! - Elapsed-time accounting that excludes paused intervals
//! - Expiry detection on tick, with removal from the store
//! - Event firing for renderers and logging

use std::collections::BTreeMap;

use tokio::sync::mpsc;

use crate::store::{NotificationStore, TimerPatch};
use crate::types::{progress_percent, NotificationId};

// ============================================================================
// TimerEvent
// ============================================================================

/// Countdown events for renderers and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown registered in the running state
    Created {
        /// Notification id
        id: NotificationId,
        /// Effective duration
        duration_ms: u64,
    },
    /// Countdown frozen
    Paused {
        /// Notification id
        id: NotificationId,
        /// Elapsed running time committed on pause
        elapsed_ms: u64,
    },
    /// Countdown resumed
    Resumed {
        /// Notification id
        id: NotificationId,
        /// Elapsed running time carried into the new segment
        elapsed_ms: u64,
    },
    /// Countdown reached its duration and the notification was removed
    Expired {
        /// Notification id
        id: NotificationId,
    },
    /// Notification removed on request
    Closed {
        /// Notification id
        id: NotificationId,
    },
}

// ============================================================================
// CountdownState / Transition
// ============================================================================

/// Lifecycle state of a single countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Accruing elapsed time
    Running,
    /// Elapsed time frozen
    Paused,
    /// Terminal; the notification is no longer in the store
    Removed,
}

impl CountdownState {
    /// Returns the string representation of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownState::Running => "running",
            CountdownState::Paused => "paused",
            CountdownState::Removed => "removed",
        }
    }
}

/// Transition applied by an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Running → Paused
    Paused,
    /// Paused → Running
    Resumed,
    /// Running/Paused → Removed by deadline
    Expired,
    /// Running/Paused → Removed by request
    Closed,
}

impl Transition {
    /// Returns true if the transition removed the notification from the store.
    pub fn is_removal(&self) -> bool {
        matches!(self, Transition::Expired | Transition::Closed)
    }
}

// ============================================================================
// Countdown
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Countdown {
    duration_ms: u64,
    /// Elapsed running time committed at the start of the current segment.
    committed_ms: u64,
    /// Clock reading when the current running segment began; `None` while paused.
    segment_start: Option<u64>,
}

impl Countdown {
    fn elapsed(&self, now_ms: u64) -> u64 {
        match self.segment_start {
            Some(start) => self.committed_ms + now_ms.saturating_sub(start),
            None => self.committed_ms,
        }
    }

    fn state(&self) -> CountdownState {
        if self.segment_start.is_some() {
            CountdownState::Running
        } else {
            CountdownState::Paused
        }
    }

    fn is_due(&self, now_ms: u64) -> bool {
        self.elapsed(now_ms) >= self.duration_ms
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Drives every active countdown and removes expired notifications.
///
/// The engine never reads a clock itself; callers pass the current reading,
/// which keeps transitions deterministic.
#[derive(Debug, Default)]
pub struct TimerEngine {
    /// Countdowns keyed by id, so iteration follows creation order
    countdowns: BTreeMap<NotificationId, Countdown>,
    /// Optional event sender channel
    event_tx: Option<mpsc::UnboundedSender<TimerEvent>>,
}

impl TimerEngine {
    /// Creates an engine without an event channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that reports transitions on the given channel.
    pub fn with_events(event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            countdowns: BTreeMap::new(),
            event_tx: Some(event_tx),
        }
    }

    /// Starts a running countdown for a freshly created notification.
    pub fn register(&mut self, id: NotificationId, duration_ms: u64, now_ms: u64) {
        let duration_ms = duration_ms.max(1);
        self.countdowns.insert(
            id,
            Countdown {
                duration_ms,
                committed_ms: 0,
                segment_start: Some(now_ms),
            },
        );
        tracing::debug!(%id, duration_ms, "countdown started");
        self.emit(TimerEvent::Created { id, duration_ms });
    }

    /// Re-evaluates every running countdown.
    ///
    /// Expired notifications are removed from the store; the others get their
    /// elapsed snapshot refreshed. Returns the expired ids in creation order.
    pub fn tick(&mut self, store: &mut NotificationStore, now_ms: u64) -> Vec<NotificationId> {
        let mut expired = Vec::new();

        for (&id, countdown) in &self.countdowns {
            if countdown.state() != CountdownState::Running {
                continue;
            }

            let elapsed = countdown.elapsed(now_ms);
            if elapsed >= countdown.duration_ms {
                expired.push(id);
            } else {
                store.update(
                    id,
                    TimerPatch {
                        elapsed_active_ms: Some(elapsed),
                        paused: None,
                    },
                );
            }
        }

        for &id in &expired {
            self.expire(store, id);
        }

        expired
    }

    /// Freezes a running countdown.
    ///
    /// A countdown whose deadline has already passed expires instead.
    /// Unknown ids and already-paused countdowns are ignored.
    pub fn pause(
        &mut self,
        store: &mut NotificationStore,
        id: NotificationId,
        now_ms: u64,
    ) -> Option<Transition> {
        let countdown = self.countdowns.get_mut(&id)?;
        if countdown.state() != CountdownState::Running {
            return None;
        }

        if countdown.is_due(now_ms) {
            self.expire(store, id);
            return Some(Transition::Expired);
        }

        let elapsed_ms = countdown.elapsed(now_ms);
        countdown.committed_ms = elapsed_ms;
        countdown.segment_start = None;

        store.update(
            id,
            TimerPatch {
                elapsed_active_ms: Some(elapsed_ms),
                paused: Some(true),
            },
        );

        tracing::debug!(%id, elapsed_ms, "countdown paused");
        self.emit(TimerEvent::Paused { id, elapsed_ms });
        Some(Transition::Paused)
    }

    /// Resumes a paused countdown from its committed elapsed time.
    ///
    /// Unknown ids and running countdowns are ignored.
    pub fn resume(
        &mut self,
        store: &mut NotificationStore,
        id: NotificationId,
        now_ms: u64,
    ) -> Option<Transition> {
        let countdown = self.countdowns.get_mut(&id)?;
        if countdown.state() != CountdownState::Paused {
            return None;
        }

        countdown.segment_start = Some(now_ms);
        let elapsed_ms = countdown.committed_ms;

        store.update(
            id,
            TimerPatch {
                elapsed_active_ms: None,
                paused: Some(false),
            },
        );

        tracing::debug!(%id, elapsed_ms, "countdown resumed");
        self.emit(TimerEvent::Resumed { id, elapsed_ms });
        Some(Transition::Resumed)
    }

    /// Removes a notification on request, from either live state.
    ///
    /// Returns `None` if nothing was removed.
    pub fn close(&mut self, store: &mut NotificationStore, id: NotificationId) -> Option<Transition> {
        let had_countdown = self.countdowns.remove(&id).is_some();
        let removed = store.remove(id);
        if !had_countdown && !removed {
            return None;
        }

        tracing::debug!(%id, "notification closed");
        self.emit(TimerEvent::Closed { id });
        Some(Transition::Closed)
    }

    /// Closes every notification. Returns the removed ids in store order.
    pub fn clear(&mut self, store: &mut NotificationStore) -> Vec<NotificationId> {
        self.countdowns.clear();
        let removed = store.drain();
        for &id in &removed {
            self.emit(TimerEvent::Closed { id });
        }
        removed
    }

    /// Live remaining-lifetime percentage, or `None` if the id is not active.
    pub fn progress(&self, id: NotificationId, now_ms: u64) -> Option<f64> {
        self.countdowns
            .get(&id)
            .map(|c| progress_percent(c.elapsed(now_ms), c.duration_ms))
    }

    /// Live elapsed running time, or `None` if the id is not active.
    pub fn elapsed(&self, id: NotificationId, now_ms: u64) -> Option<u64> {
        self.countdowns
            .get(&id)
            .map(|c| c.elapsed(now_ms).min(c.duration_ms))
    }

    /// Current state of a countdown; unknown ids are `Removed`.
    pub fn state(&self, id: NotificationId) -> CountdownState {
        self.countdowns
            .get(&id)
            .map_or(CountdownState::Removed, Countdown::state)
    }

    /// Number of live countdowns.
    pub fn len(&self) -> usize {
        self.countdowns.len()
    }

    /// Returns true if no countdown is live.
    pub fn is_empty(&self) -> bool {
        self.countdowns.is_empty()
    }

    fn expire(&mut self, store: &mut NotificationStore, id: NotificationId) {
        self.countdowns.remove(&id);
        store.remove(id);
        tracing::debug!(%id, "notification expired");
        self.emit(TimerEvent::Expired { id });
    }

    fn emit(&self, event: TimerEvent) {
        if let Some(tx) = &self.event_tx {
            // A dropped receiver only means nobody is listening.
            if tx.send(event).is_err() {
                tracing::trace!("timer event receiver dropped");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

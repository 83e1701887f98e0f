//! Core data types for the toast registry.
//!
//! This module defines the data structures used for:
//! - Notification identity and kinds
//! - Notification snapshots handed to renderers
//! - Creation input (`NotificationSpec`, `EnqueueRequest`)
//! - Progress computation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToastError;

// ============================================================================
// NotificationId
// ============================================================================

/// Opaque identifier of a notification, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Wraps a raw identifier value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = ToastError;

    /// Accepts `toast-<n>` or a bare `<n>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix("toast-").unwrap_or(s.trim());
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ToastError::InvalidId(s.to_string()))
    }
}

// ============================================================================
// NotificationKind
// ============================================================================

/// Closed set of notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Operation completed successfully
    Success,
    /// Operation failed
    Error,
    /// Something needs attention
    Warning,
    /// Neutral information
    #[default]
    Info,
}

impl NotificationKind {
    /// All kinds, in declaration order.
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::Success,
        NotificationKind::Error,
        NotificationKind::Warning,
        NotificationKind::Info,
    ];

    /// Returns the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
            NotificationKind::Info => "info",
        }
    }

    /// Returns the title used when the caller does not supply one.
    pub fn default_title(&self) -> &'static str {
        match self {
            NotificationKind::Success => "Success!",
            NotificationKind::Error => "Error!",
            NotificationKind::Warning => "Warning!",
            NotificationKind::Info => "Info",
        }
    }

    /// Coerces free-form input into a kind, falling back to `Info`.
    pub fn parse_lossy(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(kind = raw, "unknown notification kind, using info");
            NotificationKind::Info
        })
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the strict kind parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown notification kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for NotificationKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(NotificationKind::Success),
            "error" => Ok(NotificationKind::Error),
            "warning" => Ok(NotificationKind::Warning),
            "info" => Ok(NotificationKind::Info),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(raw: &str) -> Self {
        Self::parse_lossy(raw)
    }
}

impl From<String> for NotificationKind {
    fn from(raw: String) -> Self {
        Self::parse_lossy(&raw)
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Remaining lifetime as a percentage in `[0, 100]`.
///
/// A zero duration is treated as 1 ms.
pub fn progress_percent(elapsed_ms: u64, duration_ms: u64) -> f64 {
    let duration = duration_ms.max(1) as f64;
    let remaining = 100.0 * (1.0 - elapsed_ms as f64 / duration);
    remaining.clamp(0.0, 100.0)
}

// ============================================================================
// Notification
// ============================================================================

/// Snapshot of an active notification as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier, immutable once assigned
    pub id: NotificationId,
    /// Kind of the notification
    pub kind: NotificationKind,
    /// Short label
    pub title: String,
    /// Free-text body, may be empty
    pub message: String,
    /// Total running time before automatic removal
    pub duration_ms: u64,
    /// Clock reading at enqueue time
    pub created_at_ms: u64,
    /// Time accumulated in the running state, as of the last timer update
    pub elapsed_active_ms: u64,
    /// Whether the countdown is currently frozen
    pub paused: bool,
}

impl Notification {
    /// Builds a fresh, running notification from validated input.
    pub(crate) fn new(id: NotificationId, spec: NotificationSpec, created_at_ms: u64) -> Self {
        Self {
            id,
            kind: spec.kind,
            title: spec.title,
            message: spec.message,
            duration_ms: spec.duration_ms,
            created_at_ms,
            elapsed_active_ms: 0,
            paused: false,
        }
    }

    /// Remaining lifetime percentage based on the last committed elapsed time.
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.elapsed_active_ms, self.duration_ms)
    }

    /// Returns true if the countdown is accruing time.
    pub fn is_running(&self) -> bool {
        !self.paused
    }

    /// Remaining running time in milliseconds.
    pub fn remaining_ms(&self) -> u64 {
        self.duration_ms.saturating_sub(self.elapsed_active_ms)
    }
}

// ============================================================================
// NotificationSpec
// ============================================================================

/// Validated creation input for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSpec {
    /// Kind of the notification
    pub kind: NotificationKind,
    /// Resolved title
    pub title: String,
    /// Body text
    pub message: String,
    /// Positive duration in milliseconds
    pub duration_ms: u64,
}

impl NotificationSpec {
    /// Creates a spec whose title is derived from the kind.
    pub fn new(kind: NotificationKind, message: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            kind,
            title: kind.default_title().to_string(),
            message: message.into(),
            duration_ms: duration_ms.max(1),
        }
    }
}

// ============================================================================
// EnqueueRequest
// ============================================================================

/// Caller-facing creation request, normalized by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnqueueRequest {
    /// Kind of the notification
    pub kind: NotificationKind,
    /// Body text
    pub message: String,
    /// Explicit title (derived from the kind when absent)
    pub title: Option<String>,
    /// Requested duration; missing or non-positive values use the default
    pub duration_ms: Option<i64>,
}

impl EnqueueRequest {
    /// Creates a request with the given kind and message.
    pub fn new(kind: impl Into<NotificationKind>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            title: None,
            duration_ms: None,
        }
    }

    /// Sets the requested duration.
    #[must_use]
    pub fn duration_ms(mut self, duration_ms: i64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets an explicit title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

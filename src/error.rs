//! Error types for the toast registry.
//!
//! Only wiring defects are surfaced as errors. Malformed notification
//! content (unknown kinds, bad durations) and stale identifiers are
//! normalized or ignored by the service instead.

use thiserror::Error;

/// Errors that can occur in the toast registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToastError {
    /// The process-wide service was used before `init`.
    #[error("notification service is not initialized")]
    NotInitialized,

    /// `init` was called while a process-wide service already exists.
    #[error("notification service is already initialized")]
    AlreadyInitialized,

    /// Configuration could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A textual notification identifier could not be parsed.
    #[error("invalid notification id: {0}")]
    InvalidId(String),

    /// The tick driver was started outside a tokio runtime.
    #[error("no tokio runtime available to run the tick driver")]
    NoRuntime,
}

impl ToastError {
    /// Returns true if this error indicates a wiring defect in the caller.
    #[must_use]
    pub fn is_wiring_error(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized | Self::AlreadyInitialized | Self::NoRuntime
        )
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NotInitialized => "call toastline::service::init() during application startup",
            Self::AlreadyInitialized => "call toastline::service::shutdown() before re-initializing",
            Self::Config(_) => "check the configuration file and values",
            Self::InvalidId(_) => "use an id of the form toast-<n>",
            Self::NoRuntime => "start the tick driver from within a tokio runtime",
        }
    }
}

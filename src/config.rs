//! Registry configuration.
//!
//! All fields have defaults, so a partial JSON document is valid:
//!
//! ```
//! use toastline::config::ToastConfig;
//!
//! let config = ToastConfig::from_json_str(r#"{ "tickIntervalMs": 20 }"#).unwrap();
//! assert_eq!(config.tick_interval_ms, 20);
//! assert_eq!(config.default_duration_ms, 3000);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ToastError;

/// Default lifetime of a notification in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 3000;

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_min_duration_ms() -> u64 {
    1
}

fn default_tick_interval_ms() -> u64 {
    50
}

/// Configuration for the notification service and its tick driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastConfig {
    /// Duration applied when the caller omits one or passes a non-positive value.
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,

    /// Lower bound for any effective duration.
    #[serde(default = "default_min_duration_ms")]
    pub min_duration_ms: u64,

    /// Period of the tick driver; bounds how late an expiry can be detected.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: default_duration_ms(),
            min_duration_ms: default_min_duration_ms(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl ToastConfig {
    /// Sets the tick interval.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Sets the default duration.
    #[must_use]
    pub fn with_default_duration_ms(mut self, ms: u64) -> Self {
        self.default_duration_ms = ms;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ToastError> {
        if self.tick_interval_ms == 0 {
            return Err(ToastError::Config(
                "tickIntervalMs must be greater than 0".to_string(),
            ));
        }
        if self.min_duration_ms == 0 {
            return Err(ToastError::Config(
                "minDurationMs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ToastError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ToastError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ToastError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ToastError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Tick driver period.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Resolves a caller-supplied duration into an effective positive one.
    ///
    /// Missing and non-positive values fall back to the default; the result
    /// is never below `min_duration_ms` (nor below 1).
    pub fn normalize_duration(&self, requested: Option<i64>) -> u64 {
        let floor = self.min_duration_ms.max(1);
        match requested {
            Some(ms) if ms > 0 => (ms as u64).max(floor),
            Some(ms) => {
                tracing::debug!(requested = ms, "non-positive duration, using default");
                self.default_duration_ms.max(floor)
            }
            None => self.default_duration_ms.max(floor),
        }
    }
}

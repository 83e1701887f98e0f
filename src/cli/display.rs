//! Display utilities for the toastline CLI.
//!
//! This module provides formatted output for:
//! - Toast snapshots (progress bars or JSON lines)
//! - Countdown events
//! - Error messages

use crate::scheduler::TimerEvent;
use crate::types::Notification;

/// Width of the rendered progress bar in characters.
const BAR_WIDTH: usize = 20;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Prints the current list of toasts.
    pub fn show_snapshot(items: &[Notification], json: bool) {
        if json {
            match serde_json::to_string(items) {
                Ok(line) => println!("{}", line),
                Err(e) => Self::show_error(&e.to_string()),
            }
            return;
        }

        if items.is_empty() {
            println!("(no toasts)");
            return;
        }
        for item in items {
            println!("{}", Self::format_toast(item));
        }
    }

    /// Prints a countdown event.
    pub fn show_event(event: &TimerEvent) {
        println!("{}", Self::format_event(event));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Formats one toast as a single line.
    pub fn format_toast(item: &Notification) -> String {
        let percent = item.progress_percent();
        let mut line = format!(
            "{} [{}] {} {} {:>3.0}%",
            item.id,
            Self::progress_bar(percent, BAR_WIDTH),
            item.title,
            item.message,
            percent
        );
        if item.paused {
            line.push_str(" (paused)");
        }
        line
    }

    /// Formats a countdown event.
    pub fn format_event(event: &TimerEvent) -> String {
        match event {
            TimerEvent::Created { id, duration_ms } => {
                format!("+ {} shown for {}", id, Self::format_duration(*duration_ms))
            }
            TimerEvent::Paused { id, elapsed_ms } => {
                format!("|| {} paused at {}", id, Self::format_duration(*elapsed_ms))
            }
            TimerEvent::Resumed { id, elapsed_ms } => {
                format!("> {} resumed at {}", id, Self::format_duration(*elapsed_ms))
            }
            TimerEvent::Expired { id } => format!("- {} expired", id),
            TimerEvent::Closed { id } => format!("x {} closed", id),
        }
    }

    /// Renders a percentage as a fixed-width bar of `#` and `-`.
    fn progress_bar(percent: f64, width: usize) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
    }

    /// Formats milliseconds as `1.5s`.
    fn format_duration(ms: u64) -> String {
        format!("{}.{}s", ms / 1000, (ms % 1000) / 100)
    }
}

// ============================================================================
// Tests
// ============================================================================

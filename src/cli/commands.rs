//! Command definitions for the toastline CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// Toastline - terminal playground for the toast notification registry
#[derive(Parser, Debug)]
#[command(
    name = "toastline",
    version,
    about = "Toast notifications with pausable countdowns",
    long_about = "Runs the in-process toast registry in a terminal.\n\
                  Toasts are rendered with a progress bar until they expire or are closed.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the tick interval in milliseconds
    #[arg(
        long,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..=10_000)
    )]
    pub tick_ms: Option<u64>,

    /// Print snapshots as JSON lines instead of progress bars
    #[arg(long, global = true)]
    pub json: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show a single toast until it expires
    Show(ShowArgs),

    /// Run several toasts concurrently, one hovered and one closed early
    Demo,

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Show Command Arguments
// ============================================================================

/// Arguments for the show command
#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Kind: success, error, warning or info (anything else is shown as info)
    #[arg(short, long, default_value = "info")]
    pub kind: String,

    /// Message body
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Title (derived from the kind when omitted)
    #[arg(short, long, value_parser = validate_title)]
    pub title: Option<String>,

    /// Duration in milliseconds (missing or non-positive uses the default)
    #[arg(short, long, allow_negative_numbers = true)]
    pub duration: Option<i64>,

    /// Start a simulated hover after this many milliseconds
    #[arg(long, requires = "hover_for")]
    pub hover_at: Option<u64>,

    /// Length of the simulated hover in milliseconds
    #[arg(long, requires = "hover_at")]
    pub hover_for: Option<u64>,
}

impl ShowArgs {
    /// Simulated hover window, if both ends were given.
    pub fn hover(&self) -> Option<(u64, u64)> {
        self.hover_at.zip(self.hover_for)
    }
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            kind: "info".to_string(),
            message: String::new(),
            title: None,
            duration: None,
            hover_at: None,
            hover_for: None,
        }
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates the title.
///
/// - Must not be empty
/// - Must not exceed 80 characters
fn validate_title(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("title must not be empty".to_string());
    }
    if s.chars().count() > 80 {
        return Err("title must be at most 80 characters".to_string());
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================

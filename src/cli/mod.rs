//! CLI module for toastline.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `session`: Terminal session around the process-wide service
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands, ShowArgs};
pub use display::Display;
pub use session::{run_demo, run_show, Session};

//! Toastline CLI - toast notifications with pausable countdowns
//!
//! Runs the in-process toast registry in a terminal:
//! - `show` renders a single toast until it expires
//! - `demo` runs several concurrent toasts with hover and early close

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use toastline::cli::{run_demo, run_show, Cli, Commands, Display};
use toastline::config::ToastConfig;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Builds the configuration from the config file and CLI overrides.
fn load_config(cli: &Cli) -> Result<ToastConfig> {
    let mut config = match &cli.config {
        Some(path) => ToastConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ToastConfig::default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match &cli.command {
        Some(Commands::Show(args)) => {
            let config = load_config(&cli)?;
            run_show(config, args, cli.json).await?;
        }
        Some(Commands::Demo) => {
            let config = load_config(&cli)?;
            run_demo(config, cli.json).await?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(*shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

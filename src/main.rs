//! FocusTodo - a personal task-management console
//!
//! An interactive console for organizing tasks, subtasks and projects:
//! - Composite task trees with cascading completion
//! - A pomodoro work timer with configurable breaks
//! - Premium folders and usage reports behind a subscription

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use focustodo::auth::StaticAuthenticator;
use focustodo::cli::{Cli, Commands, Display, Session};
use focustodo::notify::ConsoleNotifier;

/// Main entry point
fn main() {
    // Initialize logging
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse();

    // Execute command
    if let Err(e) = execute(cli) {
        let _ = Display::show_error(&mut io::stderr(), &e.to_string());
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
fn execute(cli: Cli) -> Result<()> {
    // Set verbose logging if requested
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, run the interactive console
            let stdin = io::stdin().lock();
            let stdout = io::stdout().lock();
            let mut session = Session::new(
                stdin,
                stdout,
                StaticAuthenticator::with_demo_accounts(),
                ConsoleNotifier,
            );
            session.run()?;
        }
    }

    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

//! Command definitions for the FocusTodo CLI.
//!
//! Uses clap derive macro for argument parsing. Running without a
//! subcommand starts the interactive console.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Structure
// ============================================================================

/// FocusTodo - a personal task-management console
#[derive(Parser, Debug)]
#[command(
    name = "focustodo",
    version,
    about = "Personal task manager with projects, folders and a pomodoro timer",
    long_about = "An interactive console for organizing tasks, subtasks and projects,\n\
                  with a pomodoro work timer, subscription tiers and usage reports.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Tests
// ============================================================================

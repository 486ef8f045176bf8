//! Command-line interface for FocusTodo.
//!
//! This module provides:
//! - `commands`: clap argument and subcommand definitions
//! - `display`: console rendering for menus, listings and reports
//! - `session`: the interactive request/response loop

pub mod commands;
pub mod display;
pub mod session;

pub use commands::{Cli, Commands};
pub use display::Display;
pub use session::Session;

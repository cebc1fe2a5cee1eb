//! cli
//!
//! Command-line interface layer for jvcl.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialise logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers load [`Settings`](crate::core::config::Settings)
//! from the environment and hand them to [`crate::changelog`].

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use crate::ui::{logging, output::Verbosity};
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    logging::init_tracing(verbosity.log_level());

    let command = cli
        .command
        .unwrap_or(Command::Generate { dry_run: false });
    commands::dispatch(command, verbosity)
}

//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Async Commands
//!
//! `generate` and `inspect` talk to Jenkins over HTTP. They are synchronous
//! at this boundary and build a tokio runtime internally.

mod completion;
mod generate;
mod inspect;

// Re-export command functions for testing and direct invocation
pub use completion::completion;
pub use generate::{generate, run as generate_with_source};
pub use inspect::{describe, inspect};

use crate::cli::args::Command;
use crate::ui::output::Verbosity;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, verbosity: Verbosity) -> Result<()> {
    match command {
        Command::Generate { dry_run } => generate(verbosity, dry_run),
        Command::Inspect { build_id } => inspect(verbosity, build_id),
        Command::Completion { shell } => completion(shell),
    }
}

//! jenkins-changelog - Release changelogs for Jenkins builds
//!
//! `jvcl` runs as a step of a Jenkins job. It finds the most recent earlier
//! build of the same branch and mode that succeeded with a version not newer
//! than the current one, and writes the git history between that build's
//! commit and the current commit to `git.log`.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates)
//! - [`core`] - Domain types and environment-driven configuration
//! - [`ci`] - Build metadata from the CI server (Jenkins JSON API)
//! - [`changelog`] - Anchor search, history extraction, composition
//! - [`git`] - Single interface for all Git operations
//! - [`ui`] - Operator output and logging
//!
//! # Failure Policy
//!
//! 1. Missing configuration, CI transport or auth failures, unwritable
//!    output and empty history behind a found anchor are fatal
//! 2. Builds without usable data are skipped
//! 3. Finding no anchor at all is not an error

pub mod changelog;
pub mod ci;
pub mod cli;
pub mod core;
pub mod git;
pub mod ui;

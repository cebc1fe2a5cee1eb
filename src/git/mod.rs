//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. Nothing else imports `git2`
//! and nothing shells out to the git CLI.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Revision resolution
//! - Range walks (`anchor..head`) rendered as `git log` text
//!
//! # Invariants
//!
//! - Repositories are opened at an explicit path; the process working
//!   directory is never changed

mod interface;

pub use interface::{CommitInfo, Git, GitError};

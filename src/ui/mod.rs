//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Operator-facing output
//! - [`logging`] - Tracing subscriber initialisation

pub mod logging;
pub mod output;

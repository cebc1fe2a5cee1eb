//! core
//!
//! Core domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - BuildRecord, SearchContext, Anchor
//! - [`config`] - Environment-driven run settings
//!
//! # Design Principles
//!
//! - Configuration is read once and passed explicitly
//! - Records are only constructed from complete data

pub mod config;
pub mod types;

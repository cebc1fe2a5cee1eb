//! ci
//!
//! Build metadata from the CI server.
//!
//! # Architecture
//!
//! The [`BuildSource`] trait is the only thing the anchor search depends on.
//! Production code uses [`jenkins::JenkinsClient`]; tests use
//! [`mock::MockBuildSource`].
//!
//! # Modules
//!
//! - `traits`: `BuildSource` trait and `CiError`
//! - [`payload`]: Decoding of the Jenkins build JSON
//! - [`jenkins`]: HTTP client for the Jenkins JSON API
//! - [`mock`]: In-memory source for deterministic testing

pub mod jenkins;
pub mod mock;
pub mod payload;
mod traits;

pub use traits::*;

//! ci::traits
//!
//! The `BuildSource` trait: where the anchor search gets build facts from.
//!
//! # Design
//!
//! The trait is async because real sources talk to a CI server over HTTP.
//! The matcher awaits one fetch at a time, so from its point of view every
//! probe is a blocking call.
//!
//! A fetch has three outcomes:
//! - `Ok(Some(record))` - the build exists and carries complete data
//! - `Ok(None)` - nothing usable (missing, still running, incomplete)
//! - `Err(CiError)` - transport or authentication failure, fatal for the run

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::BuildRecord;

/// Errors from talking to the CI server.
///
/// These are never per-build conditions: a build that simply has no data
/// is `Ok(None)`, not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CiError {
    /// Credentials were rejected.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The configured job URL cannot be used.
    #[error("invalid job URL: {0}")]
    InvalidUrl(String),
}

/// Source of build records.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a source can be shared by
/// reference across an async task.
///
/// # Example
///
/// ```ignore
/// use jenkins_changelog::ci::BuildSource;
///
/// async fn latest_success(source: &dyn BuildSource, id: u64) -> Result<bool, CiError> {
///     Ok(source.fetch(id).await?.map(|r| r.succeeded).unwrap_or(false))
/// }
/// ```
#[async_trait]
pub trait BuildSource: Send + Sync {
    /// Source name for diagnostics (e.g., "jenkins", "mock").
    fn name(&self) -> &'static str;

    /// Fetch the record of build `id`.
    ///
    /// # Errors
    ///
    /// - `AuthFailed` if the server rejects the credentials
    /// - `NetworkError` if the server cannot be reached
    async fn fetch(&self, id: u64) -> Result<Option<BuildRecord>, CiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ci_error_display() {
        assert_eq!(
            format!("{}", CiError::AuthFailed("HTTP 401".into())),
            "authentication failed: HTTP 401"
        );
        assert_eq!(
            format!("{}", CiError::NetworkError("connection refused".into())),
            "network error: connection refused"
        );
        assert_eq!(
            format!("{}", CiError::InvalidUrl("not a url".into())),
            "invalid job URL: not a url"
        );
    }
}

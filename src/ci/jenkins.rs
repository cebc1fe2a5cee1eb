//! ci::jenkins
//!
//! Jenkins implementation of [`BuildSource`] using the JSON REST API.
//!
//! # Endpoint
//!
//! `GET {JOB_URL}{id}/api/json?pretty=true` with HTTP basic authentication.
//! `JOB_URL` is used verbatim; Jenkins exports it with a trailing slash.
//!
//! # Error Mapping
//!
//! - 401 / 403 → [`CiError::AuthFailed`] (fatal)
//! - connection or body read failure → [`CiError::NetworkError`] (fatal)
//! - anything else → body handed to [`parse_build`]; undecodable bodies
//!   (404 pages, running builds) are `Ok(None)`
//!
//! No request is retried.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};

use super::payload::parse_build;
use super::traits::{BuildSource, CiError};
use crate::core::config::{CiSettings, Credentials};
use crate::core::types::BuildRecord;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "jvcl";

/// Path appended to `{JOB_URL}{id}`.
const API_SUFFIX: &str = "/api/json?pretty=true";

/// Jenkins build source.
pub struct JenkinsClient {
    /// HTTP client for making requests
    client: Client,
    /// Base job URL, build number is appended directly
    job_url: String,
    credentials: Credentials,
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for JenkinsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JenkinsClient")
            .field("job_url", &self.job_url)
            .field("username", &self.credentials.username)
            .finish()
    }
}

impl JenkinsClient {
    /// Create a client for the given job.
    ///
    /// # Errors
    ///
    /// Returns `CiError::InvalidUrl` if `job_url` is not an http(s) URL.
    pub fn new(job_url: impl Into<String>, credentials: Credentials) -> Result<Self, CiError> {
        let job_url = job_url.into();
        if !(job_url.starts_with("http://") || job_url.starts_with("https://")) {
            return Err(CiError::InvalidUrl(job_url));
        }
        Ok(Self {
            client: Client::new(),
            job_url,
            credentials,
        })
    }

    /// Create a client from loaded CI settings.
    pub fn from_settings(settings: &CiSettings) -> Result<Self, CiError> {
        Self::new(settings.job_url.clone(), settings.credentials.clone())
    }

    /// URL of the JSON document for build `id`.
    pub fn build_url(&self, id: u64) -> String {
        format!("{}{}{}", self.job_url, id, API_SUFFIX)
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }
}

#[async_trait]
impl BuildSource for JenkinsClient {
    fn name(&self) -> &'static str {
        "jenkins"
    }

    async fn fetch(&self, id: u64) -> Result<Option<BuildRecord>, CiError> {
        let url = self.build_url(id);
        tracing::debug!(build = id, %url, "probing build");

        let response = self
            .client
            .get(&url)
            .headers(Self::headers())
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| CiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(CiError::AuthFailed(format!(
                "{} rejected credentials for '{}' (HTTP {})",
                url,
                self.credentials.username,
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CiError::NetworkError(e.to_string()))?;

        let record = parse_build(id, &body);
        if record.is_none() {
            tracing::debug!(build = id, status = status.as_u16(), "no usable build data");
        }
        Ok(record)
    }
}

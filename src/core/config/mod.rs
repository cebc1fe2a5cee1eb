//! core::config
//!
//! Run configuration, read once from the process environment.
//!
//! # Overview
//!
//! Jenkins hands every build parameter to the job as an environment variable.
//! This module turns those variables into a [`Settings`] value at startup;
//! nothing else in the crate touches the environment.
//!
//! # Variables
//!
//! Required: `BRANCH`, `MODE`, `BUILD_NAME`, `BUILD_ID`, `WORKSPACE`,
//! `GIT_COMMIT`, `JOB_URL`, `JENKINS_USERNAME`, `JENKINS_PASSWORD`.
//!
//! Optional: `LAST_BUILD_COMMIT` (anchor override), `GIT_LOG` (operator
//! notes), `CHANGE_LOG` (preset changelog, skips generation), `PWD` (output
//! directory).
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use jenkins_changelog::core::config::{ConfigError, Settings};
//!
//! let vars: HashMap<&str, &str> = HashMap::from([("BRANCH", "main")]);
//! let err = Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap_err();
//! assert!(matches!(err, ConfigError::Missing { .. }));
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::SearchContext;

/// Errors from configuration loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required variable {name} is not set")]
    Missing { name: String },

    #[error("BUILD_ID is not a positive integer: '{value}'")]
    InvalidBuildId { value: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Basic-auth credentials for the CI server.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings needed to talk to the CI server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiSettings {
    /// Base job URL; the build number is appended directly
    pub job_url: String,
    pub credentials: Credentials,
}

impl CiSettings {
    /// Load CI settings through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let job_url = required(&lookup, "JOB_URL")?;
        if job_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("JOB_URL is empty".into()));
        }
        Ok(Self {
            job_url,
            credentials: Credentials {
                username: required(&lookup, "JENKINS_USERNAME")?,
                password: required(&lookup, "JENKINS_PASSWORD")?,
            },
        })
    }

    /// Load CI settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }
}

/// Everything one `generate` run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub branch: String,
    pub mode: String,
    /// `BUILD_NAME`, compared lexically against prior builds
    pub version: String,
    pub build_id: u64,
    /// Repository checkout of the running build
    pub workspace: PathBuf,
    /// `GIT_COMMIT` of the running build
    pub head_commit: String,
    pub ci: CiSettings,
    /// `LAST_BUILD_COMMIT`; empty values are treated as unset
    pub anchor_override: Option<String>,
    /// `GIT_LOG`; empty when unset
    pub custom_log: String,
    /// Directory that receives `git.log`
    pub output_dir: PathBuf,
}

impl Settings {
    /// Load settings through `lookup`.
    ///
    /// Fails on the first missing required variable. `PWD` falls back to the
    /// process current directory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let branch = required(&lookup, "BRANCH")?;
        let mode = required(&lookup, "MODE")?;
        let version = required(&lookup, "BUILD_NAME")?;
        let build_id = parse_build_id(&required(&lookup, "BUILD_ID")?)?;
        let workspace = PathBuf::from(required(&lookup, "WORKSPACE")?);
        let head_commit = required(&lookup, "GIT_COMMIT")?;
        let ci = CiSettings::from_lookup(&lookup)?;

        let output_dir = match non_empty(lookup("PWD")) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().map_err(|e| {
                ConfigError::InvalidValue(format!("cannot determine current directory: {}", e))
            })?,
        };

        Ok(Self {
            branch,
            mode,
            version,
            build_id,
            workspace,
            head_commit,
            ci,
            anchor_override: non_empty(lookup("LAST_BUILD_COMMIT")),
            custom_log: lookup("GIT_LOG").unwrap_or_default(),
            output_dir,
        })
    }

    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build the anchor search inputs.
    pub fn search_context(&self) -> SearchContext {
        let ctx = SearchContext::new(
            &self.branch,
            &self.mode,
            &self.version,
            &self.head_commit,
            self.build_id,
        );
        match &self.anchor_override {
            Some(commit) => ctx.with_anchor_override(commit),
            None => ctx,
        }
    }
}

/// `CHANGE_LOG`, when set and non-empty.
///
/// Checked before [`Settings`] are loaded: a job that already carries its
/// notes does not need the other variables.
pub fn preset_changelog<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup("CHANGE_LOG"))
}

/// [`preset_changelog`] against the process environment.
pub fn preset_changelog_from_env() -> Option<String> {
    preset_changelog(env_lookup)
}

/// Parse a `BUILD_ID` value (integer >= 1).
pub fn parse_build_id(value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ConfigError::InvalidBuildId {
            value: value.to_string(),
        }),
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn required<F>(lookup: &F, name: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| ConfigError::Missing {
        name: name.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

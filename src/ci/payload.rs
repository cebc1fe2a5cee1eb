//! ci::payload
//!
//! Decoding of the Jenkins build JSON (`/api/json`).
//!
//! # Format
//!
//! ```json
//! {
//!   "result": "SUCCESS",
//!   "actions": [
//!     { "_class": "hudson.model.ParametersAction",
//!       "parameters": [ { "name": "BRANCH", "value": "main" } ] },
//!     { "_class": "hudson.plugins.git.util.BuildData",
//!       "lastBuiltRevision": { "SHA1": "4f1c..." } },
//!     {}
//!   ]
//! }
//! ```
//!
//! Actions are a tagged union keyed by `_class`. The discriminator is read
//! first, then the action is decoded as the matching variant. Unknown or
//! untagged actions are ignored.

use serde::Deserialize;
use serde_json::Value;

use crate::core::types::BuildRecord;

/// `_class` of the action carrying build parameters.
pub const PARAMETERS_ACTION: &str = "hudson.model.ParametersAction";

/// `_class` of the action carrying the built git revision.
pub const GIT_BUILD_DATA_ACTION: &str = "hudson.plugins.git.util.BuildData";

/// Terminal status of a successful build.
pub const SUCCESS_RESULT: &str = "SUCCESS";

const BRANCH_PARAM: &str = "BRANCH";
const MODE_PARAM: &str = "MODE";
const VERSION_PARAM: &str = "BUILD_NAME";

#[derive(Debug, Deserialize)]
struct BuildDocument {
    /// `null` while the build is still running
    result: Option<String>,
    #[serde(default)]
    actions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ParametersAction {
    #[serde(default)]
    parameters: Vec<Parameter>,
}

#[derive(Debug, Deserialize)]
struct Parameter {
    name: Option<String>,
    /// Non-string values (boolean parameters etc.) are ignored
    #[serde(default)]
    value: Value,
}

#[derive(Debug, Deserialize)]
struct GitBuildData {
    #[serde(rename = "lastBuiltRevision")]
    last_built_revision: Option<Revision>,
}

#[derive(Debug, Deserialize)]
struct Revision {
    #[serde(rename = "SHA1")]
    sha1: Option<String>,
}

/// One decoded entry of the `actions` list.
#[derive(Debug)]
enum Action {
    Parameters(ParametersAction),
    GitBuildData(GitBuildData),
    Other,
}

impl Action {
    fn decode(value: Value) -> Self {
        let class = value.get("_class").and_then(Value::as_str);
        match class {
            Some(PARAMETERS_ACTION) => serde_json::from_value(value)
                .map(Action::Parameters)
                .unwrap_or(Action::Other),
            Some(GIT_BUILD_DATA_ACTION) => serde_json::from_value(value)
                .map(Action::GitBuildData)
                .unwrap_or(Action::Other),
            _ => Action::Other,
        }
    }
}

/// Fields collected while scanning the action list.
#[derive(Debug, Default)]
struct Collected {
    branch: Option<String>,
    mode: Option<String>,
    version: Option<String>,
    commit: Option<String>,
}

impl Collected {
    fn absorb(&mut self, action: Action) {
        match action {
            Action::Parameters(params) => {
                for param in params.parameters {
                    let value = param.value.as_str().map(str::to_string);
                    match param.name.as_deref() {
                        Some(BRANCH_PARAM) => self.branch = value,
                        Some(MODE_PARAM) => self.mode = value,
                        Some(VERSION_PARAM) => self.version = value,
                        _ => {}
                    }
                }
            }
            Action::GitBuildData(data) => {
                self.commit = data.last_built_revision.and_then(|rev| rev.sha1);
            }
            Action::Other => {}
        }
    }
}

/// Decode the body of a build's JSON API response.
///
/// Returns `None` when the body is not a JSON object, the build has no
/// terminal result yet, the action list is empty, or any of branch, mode,
/// version and commit is missing.
///
/// # Example
///
/// ```
/// use jenkins_changelog::ci::payload::parse_build;
///
/// assert!(parse_build(7, "<html>Not Found</html>").is_none());
/// assert!(parse_build(7, r#"{"result": null, "actions": []}"#).is_none());
/// ```
pub fn parse_build(id: u64, body: &str) -> Option<BuildRecord> {
    let value: Value = serde_json::from_str(body).ok()?;
    if !value.is_object() {
        return None;
    }
    let document: BuildDocument = serde_json::from_value(value).ok()?;
    let result = document.result?;
    if document.actions.is_empty() {
        return None;
    }

    let mut collected = Collected::default();
    for action in document.actions {
        collected.absorb(Action::decode(action));
    }

    Some(BuildRecord {
        id,
        branch: collected.branch?,
        mode: collected.mode?,
        version: collected.version?,
        commit: collected.commit?,
        succeeded: result == SUCCESS_RESULT,
    })
}

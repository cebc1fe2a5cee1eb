//! cli::commands::inspect
//!
//! Show what the CI server reports for one build.
//!
//! Useful when the anchor search skips a build unexpectedly: the decoded
//! record shows exactly which branch, mode, version and commit the search
//! saw, or that the build produced no usable data at all.

use anyhow::{Context as _, Result};

use crate::ci::jenkins::JenkinsClient;
use crate::ci::BuildSource;
use crate::core::config::CiSettings;
use crate::ui::output::{self, Verbosity};

/// Run the inspect command.
pub fn inspect(verbosity: Verbosity, build_id: u64) -> Result<()> {
    let settings = CiSettings::from_env().context("failed to read the job environment")?;
    let client = JenkinsClient::from_settings(&settings)?;
    output::print(format!("GET {}", client.build_url(build_id)), verbosity);

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(describe(&client, build_id))?;
    println!("{}", report);
    Ok(())
}

/// Fetch `build_id` and render it for display.
///
/// Records are rendered as pretty JSON; absent builds as a one-line notice.
pub async fn describe(source: &dyn BuildSource, build_id: u64) -> Result<String> {
    match source.fetch(build_id).await? {
        Some(record) => Ok(serde_json::to_string_pretty(&record)?),
        None => Ok(format!(
            "build #{} has no usable data (missing, running, or lacking BRANCH/MODE/BUILD_NAME/commit)",
            build_id
        )),
    }
}

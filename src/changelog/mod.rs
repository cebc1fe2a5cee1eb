//! changelog
//!
//! Anchor search, history extraction and composition.
//!
//! # Pipeline
//!
//! ```text
//! Settings ──► matcher::find_anchor ──► history::extract ──► compose::compose
//!                  │ (BuildSource)          │ (Git at WORKSPACE)
//!                  ▼                        ▼
//!              Option<Anchor>           body text
//! ```
//!
//! [`generate`] runs the whole pipeline and returns the composed text
//! without touching the filesystem; persisting is left to the caller via
//! [`compose::write_changelog`].
//!
//! # Failure Policy
//!
//! - No anchor in the window: not an error, the body is empty
//! - Anchor found but the range is empty: [`ChangelogError::EmptyHistory`]
//! - Anchor found but the composed text is empty: [`ChangelogError::EmptyChangelog`]

pub mod compose;
pub mod history;
pub mod matcher;

use std::path::PathBuf;

use thiserror::Error;

use crate::ci::{BuildSource, CiError};
use crate::core::config::Settings;
use crate::core::types::Anchor;
use crate::git::GitError;

/// Errors from changelog generation.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// The CI server could not be queried.
    #[error(transparent)]
    Ci(#[from] CiError),

    /// The repository could not be read.
    #[error(transparent)]
    Git(#[from] GitError),

    /// The range between anchor and head produced no changelog lines.
    #[error("no changes between {anchor} and {head}; is the anchor an ancestor of the head?")]
    EmptyHistory { anchor: String, head: String },

    /// Composition produced empty text although an anchor was found.
    #[error("composed changelog is empty")]
    EmptyChangelog,

    /// The output file could not be replaced.
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// The anchor used, if any
    pub anchor: Option<Anchor>,
    /// Final changelog text
    pub text: String,
}

/// Run the pipeline for `settings`, probing builds through `source`.
///
/// # Errors
///
/// See the failure policy in the module docs. CI and Git errors are
/// propagated unchanged.
pub async fn generate(
    settings: &Settings,
    source: &dyn BuildSource,
) -> Result<Generated, ChangelogError> {
    let ctx = settings.search_context();
    let anchor = matcher::find_anchor(&ctx, source).await?;

    let body = match &anchor {
        Some(anchor) => {
            tracing::info!(commit = %anchor.commit, from = %anchor.source, "diffing against anchor");
            history::extract(&anchor.commit, &ctx.head_commit, &settings.workspace)?
        }
        None => {
            tracing::warn!(
                window = ctx.window,
                "no prior successful build of {}/{} found; changelog body left empty",
                ctx.branch,
                ctx.mode
            );
            String::new()
        }
    };

    let text = compose::compose(
        &body,
        &settings.branch,
        &settings.custom_log,
        compose::is_release_mode(&settings.mode),
    );
    if anchor.is_some() && text.is_empty() {
        return Err(ChangelogError::EmptyChangelog);
    }

    Ok(Generated { anchor, text })
}

//! changelog::matcher
//!
//! Backward search for the build that anchors the changelog.
//!
//! # Algorithm
//!
//! 1. An operator override short-circuits the search; no build is fetched.
//! 2. Otherwise ids are probed from `start_id - 1` down to
//!    `max(1, start_id - window)`, one fetch at a time.
//! 3. Absent builds are skipped. The first record that qualifies stops the
//!    search and its commit becomes the anchor.
//! 4. An exhausted window yields `None`, which is not an error.
//!
//! # Qualifying Records
//!
//! A record qualifies when it succeeded, its branch and mode equal the
//! target's exactly, and the target version is lexically greater than or
//! equal to the record's version.
//!
//! Version ordering is plain string comparison, so `"9" > "10"`. This is
//! kept deliberately; multi-digit components can select an unexpected
//! baseline.

use crate::ci::{BuildSource, CiError};
use crate::core::types::{Anchor, AnchorSource, BuildRecord, SearchContext};

/// Whether `record` may anchor the changelog of the build described by `ctx`.
///
/// # Example
///
/// ```
/// use jenkins_changelog::changelog::matcher::qualifies;
/// use jenkins_changelog::core::types::{BuildRecord, SearchContext};
///
/// let ctx = SearchContext::new("main", "debug", "1.5", "head", 40);
/// let mut record = BuildRecord {
///     id: 39,
///     branch: "main".to_string(),
///     mode: "debug".to_string(),
///     version: "1.4".to_string(),
///     commit: "abc".to_string(),
///     succeeded: true,
/// };
/// assert!(qualifies(&ctx, &record));
///
/// record.version = "1.6".to_string();
/// assert!(!qualifies(&ctx, &record));
/// ```
pub fn qualifies(ctx: &SearchContext, record: &BuildRecord) -> bool {
    record.succeeded
        && record.branch == ctx.branch
        && record.mode == ctx.mode
        && ctx.version.as_str() >= record.version.as_str()
}

/// Find the anchor commit for `ctx`.
///
/// Returns `Ok(None)` when no qualifying build exists in the window.
///
/// # Errors
///
/// Any `CiError` from the source aborts the search immediately.
pub async fn find_anchor(
    ctx: &SearchContext,
    source: &dyn BuildSource,
) -> Result<Option<Anchor>, CiError> {
    if let Some(commit) = &ctx.anchor_override {
        tracing::info!(%commit, "using operator-supplied anchor commit");
        return Ok(Some(Anchor {
            commit: commit.clone(),
            source: AnchorSource::Override,
        }));
    }

    tracing::debug!(
        source = source.name(),
        from = ctx.start_id.saturating_sub(1),
        to = ctx.lowest_id(),
        "searching prior builds"
    );

    for id in ctx.probe_ids() {
        let Some(record) = source.fetch(id).await? else {
            continue;
        };

        if qualifies(ctx, &record) {
            tracing::info!(
                build = record.id,
                version = %record.version,
                commit = %record.commit,
                "found anchor build"
            );
            return Ok(Some(Anchor {
                commit: record.commit,
                source: AnchorSource::Build(record.id),
            }));
        }

        tracing::debug!(
            build = record.id,
            succeeded = record.succeeded,
            branch = %record.branch,
            mode = %record.mode,
            version = %record.version,
            "build does not qualify"
        );
    }

    Ok(None)
}

//! core::types
//!
//! Domain types shared by the matcher, the CI client and the composer.
//!
//! # Types
//!
//! - [`BuildRecord`] - Facts extracted from one finished CI build
//! - [`SearchContext`] - Immutable per-run inputs of the anchor search
//! - [`Anchor`] - The commit that starts the changelog range, and where it came from
//!
//! # Invariants
//!
//! A `BuildRecord` only exists when branch, mode, version and commit were all
//! resolvable from the CI document. Builds with missing data never become
//! records; they are reported as "absent" by the client.

use serde::Serialize;

/// Number of prior build ids consulted by the anchor search.
pub const WINDOW_SIZE: u64 = 20;

/// One build's extracted facts.
///
/// # Example
///
/// ```
/// use jenkins_changelog::core::types::BuildRecord;
///
/// let record = BuildRecord {
///     id: 41,
///     branch: "main".to_string(),
///     mode: "debug".to_string(),
///     version: "1.2.0".to_string(),
///     commit: "a1b2c3".to_string(),
///     succeeded: true,
/// };
/// assert!(record.succeeded);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildRecord {
    /// Build number that was queried
    pub id: u64,
    /// Value of the `BRANCH` build parameter
    pub branch: String,
    /// Value of the `MODE` build parameter
    pub mode: String,
    /// Value of the `BUILD_NAME` build parameter
    pub version: String,
    /// Revision the build was built from
    pub commit: String,
    /// Whether the build's terminal status was `SUCCESS`
    pub succeeded: bool,
}

/// Inputs of one anchor search.
///
/// Built once from [`Settings`](crate::core::config::Settings) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    /// Branch of the build being packaged
    pub branch: String,
    /// Mode of the build being packaged
    pub mode: String,
    /// Version of the build being packaged
    pub version: String,
    /// Head commit of the build being packaged
    pub head_commit: String,
    /// Build number of the running build; probing starts one below it
    pub start_id: u64,
    /// How many prior ids may be probed
    pub window: u64,
    /// Operator-supplied anchor that bypasses the search
    pub anchor_override: Option<String>,
}

impl SearchContext {
    /// Create a context with the standard window and no override.
    pub fn new(
        branch: impl Into<String>,
        mode: impl Into<String>,
        version: impl Into<String>,
        head_commit: impl Into<String>,
        start_id: u64,
    ) -> Self {
        Self {
            branch: branch.into(),
            mode: mode.into(),
            version: version.into(),
            head_commit: head_commit.into(),
            start_id,
            window: WINDOW_SIZE,
            anchor_override: None,
        }
    }

    /// Set an explicit anchor commit.
    pub fn with_anchor_override(mut self, commit: impl Into<String>) -> Self {
        self.anchor_override = Some(commit.into());
        self
    }

    /// Lowest build id the search may consult.
    ///
    /// ```
    /// use jenkins_changelog::core::types::SearchContext;
    ///
    /// let ctx = SearchContext::new("main", "debug", "1.0", "abc", 100);
    /// assert_eq!(ctx.lowest_id(), 80);
    ///
    /// let ctx = SearchContext::new("main", "debug", "1.0", "abc", 5);
    /// assert_eq!(ctx.lowest_id(), 1);
    /// ```
    pub fn lowest_id(&self) -> u64 {
        self.start_id.saturating_sub(self.window).max(1)
    }

    /// Build ids to probe, most recent first.
    pub fn probe_ids(&self) -> impl Iterator<Item = u64> {
        (self.lowest_id()..self.start_id).rev()
    }
}

/// Where an anchor commit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    /// Supplied by the operator, no search performed
    Override,
    /// Taken from the given prior build
    Build(u64),
}

impl std::fmt::Display for AnchorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorSource::Override => write!(f, "operator override"),
            AnchorSource::Build(id) => write!(f, "build #{}", id),
        }
    }
}

/// Start of the changelog range (exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The anchor revision
    pub commit: String,
    /// Provenance of the revision
    pub source: AnchorSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_ids_descend_from_one_below_start() {
        let ctx = SearchContext::new("main", "debug", "1.0", "abc", 30);
        let ids: Vec<u64> = ctx.probe_ids().collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(ids.first(), Some(&29));
        assert_eq!(ids.last(), Some(&10));
    }

    #[test]
    fn probe_ids_stop_at_one() {
        let ctx = SearchContext::new("main", "debug", "1.0", "abc", 4);
        let ids: Vec<u64> = ctx.probe_ids().collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn probe_ids_empty_for_first_build() {
        let ctx = SearchContext::new("main", "debug", "1.0", "abc", 1);
        assert_eq!(ctx.probe_ids().count(), 0);
    }

    #[test]
    fn with_anchor_override_sets_commit() {
        let ctx = SearchContext::new("main", "debug", "1.0", "abc", 4).with_anchor_override("f00");
        assert_eq!(ctx.anchor_override.as_deref(), Some("f00"));
        assert_eq!(ctx.window, WINDOW_SIZE);
    }

    #[test]
    fn anchor_source_display() {
        assert_eq!(format!("{}", AnchorSource::Override), "operator override");
        assert_eq!(format!("{}", AnchorSource::Build(17)), "build #17");
    }
}

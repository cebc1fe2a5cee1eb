//! ci::mock
//!
//! In-memory build source for deterministic testing.
//!
//! # Design
//!
//! Records are stored by build id. Ids without a record fetch as `None`,
//! which is how the real client reports builds that do not exist. Every
//! fetch is recorded so tests can assert exactly which ids were probed.
//!
//! # Example
//!
//! ```
//! use jenkins_changelog::ci::mock::MockBuildSource;
//! use jenkins_changelog::ci::BuildSource;
//! use jenkins_changelog::core::types::BuildRecord;
//!
//! # tokio_test::block_on(async {
//! let source = MockBuildSource::new().with_record(BuildRecord {
//!     id: 9,
//!     branch: "main".to_string(),
//!     mode: "debug".to_string(),
//!     version: "1.0".to_string(),
//!     commit: "abc".to_string(),
//!     succeeded: true,
//! });
//!
//! assert!(source.fetch(9).await.unwrap().is_some());
//! assert!(source.fetch(8).await.unwrap().is_none());
//! assert_eq!(source.probed_ids(), vec![9, 8]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{BuildSource, CiError};
use crate::core::types::BuildRecord;

/// Mock build source for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockBuildSource {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
    /// Stored records by build id.
    records: HashMap<u64, BuildRecord>,
    /// Build id whose fetch fails, and the error it fails with.
    fail_on: Option<(u64, CiError)>,
    /// Every id passed to `fetch`, in call order.
    probed: Vec<u64>,
}

impl MockBuildSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with pre-existing records.
    pub fn with_records(records: impl IntoIterator<Item = BuildRecord>) -> Self {
        let source = Self::new();
        {
            let mut inner = source.inner.lock().unwrap();
            inner.records = records.into_iter().map(|r| (r.id, r)).collect();
        }
        source
    }

    /// Add one record.
    pub fn with_record(self, record: BuildRecord) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.records.insert(record.id, record);
        }
        self
    }

    /// Make the fetch of `id` fail with `error`.
    pub fn fail_on(self, id: u64, error: CiError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some((id, error));
        }
        self
    }

    /// Ids fetched so far, in call order.
    pub fn probed_ids(&self) -> Vec<u64> {
        let inner = self.inner.lock().unwrap();
        inner.probed.clone()
    }

    /// Number of fetches so far.
    pub fn call_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.probed.len()
    }
}

#[async_trait]
impl BuildSource for MockBuildSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, id: u64) -> Result<Option<BuildRecord>, CiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.probed.push(id);

        if let Some((fail_id, error)) = &inner.fail_on {
            if *fail_id == id {
                return Err(error.clone());
            }
        }

        Ok(inner.records.get(&id).cloned())
    }
}

//! git::interface
//!
//! Git interface implementation using git2.
//!
//! This module is the **single doorway** to the workspace repository. It
//! resolves revisions and walks commit ranges, returning structured results
//! and typed errors.
//!
//! # Error Handling
//!
//! - [`GitError::NotARepo`]: The workspace is not inside a Git repository
//! - [`GitError::BareRepo`]: The repository has no working directory
//! - [`GitError::ObjectNotFound`]: A revision does not resolve to a commit
//! - [`GitError::Internal`]: Any other git2 failure
//!
//! # Example
//!
//! ```ignore
//! use jenkins_changelog::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("/var/jenkins/workspace/app"))?;
//! let raw = git.log_range("4f1c2d0", "HEAD")?;
//! print!("{}", raw);
//! ```

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use thiserror::Error;

/// Length of abbreviated ids on `Merge:` lines.
const SHORT_ID_LEN: usize = 7;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// Revision does not name a commit in this repository.
    #[error("commit not found: {rev}")]
    ObjectNotFound {
        /// The revision as given
        rev: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// One commit of a walked range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full hex id
    pub id: String,
    /// Full hex ids of the parents
    pub parents: Vec<String>,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp in the author's own offset
    pub author_time: DateTime<FixedOffset>,
    /// Full commit message
    pub message: String,
}

impl CommitInfo {
    /// Render in the `git log` medium layout.
    ///
    /// Every message line is indented by four spaces, blank ones included,
    /// so paragraphs of one message never split on `"\n\n"`. The entry ends
    /// with a newline.
    pub fn render_medium(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "commit {}", self.id);
        if self.parents.len() > 1 {
            let short: Vec<&str> = self
                .parents
                .iter()
                .map(|p| &p[..p.len().min(SHORT_ID_LEN)])
                .collect();
            let _ = writeln!(out, "Merge: {}", short.join(" "));
        }
        let _ = writeln!(out, "Author: {} <{}>", self.author_name, self.author_email);
        let _ = writeln!(
            out,
            "Date:   {}",
            self.author_time.format("%a %b %-d %H:%M:%S %Y %z")
        );
        out.push('\n');
        for line in self.message.trim_end().lines() {
            let _ = writeln!(out, "    {}", line);
        }
        out
    }
}

/// The Git interface.
///
/// No other module imports `git2` directly.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    ///
    /// - `NotARepo` if no repository is found at or above `path`
    /// - `BareRepo` if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Resolve a revision (full or abbreviated id, ref name) to a commit id.
    pub fn resolve_commit(&self, rev: &str) -> Result<String, GitError> {
        Ok(self.peel(rev)?.to_string())
    }

    fn peel(&self, rev: &str) -> Result<git2::Oid, GitError> {
        let not_found = || GitError::ObjectNotFound {
            rev: rev.to_string(),
        };
        let object = self.repo.revparse_single(rev).map_err(|_| not_found())?;
        let commit = object.peel_to_commit().map_err(|_| not_found())?;
        Ok(commit.id())
    }

    /// Commits reachable from `head` but not from `anchor`, newest first.
    ///
    /// This is the `anchor..head` range of `git log`.
    pub fn range_commits(&self, anchor: &str, head: &str) -> Result<Vec<CommitInfo>, GitError> {
        let anchor_oid = self.peel(anchor)?;
        let head_oid = self.peel(head)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        revwalk.push(head_oid)?;
        revwalk.hide(anchor_oid)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_info(&commit));
        }
        Ok(commits)
    }

    /// Raw `git log anchor..head` text in the medium layout.
    ///
    /// Entries are separated by one blank line. An empty range yields an
    /// empty string.
    pub fn log_range(&self, anchor: &str, head: &str) -> Result<String, GitError> {
        let entries: Vec<String> = self
            .range_commits(anchor, head)?
            .iter()
            .map(CommitInfo::render_medium)
            .collect();
        Ok(entries.join("\n"))
    }
}

fn commit_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();
    CommitInfo {
        id: commit.id().to_string(),
        parents: commit.parent_ids().map(|p| p.to_string()).collect(),
        author_name: String::from_utf8_lossy(author.name_bytes()).into_owned(),
        author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
        author_time: signature_time(&author.when()),
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
    }
}

fn signature_time(time: &git2::Time) -> DateTime<FixedOffset> {
    let utc = Utc
        .timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_default();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or(Utc.fix());
    utc.with_timezone(&offset)
}

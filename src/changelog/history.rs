//! changelog::history
//!
//! Extraction of the changelog body from `anchor..head`.
//!
//! # Reformatting
//!
//! Raw `git log` text is split on blank lines (`"\n\n"`). Chunks that
//! contain the word `commit` are header chunks and are dropped. Every other
//! non-blank chunk has one four-space indent stripped from each line and is
//! appended followed by a newline.
//!
//! `git log` indents blank message lines too, so a multi-paragraph message
//! is a single chunk. The marker check is a plain substring test: a message
//! that mentions "commit" anywhere is dropped whole.
//!
//! # Empty Ranges
//!
//! An empty body is an error. When an anchor exists an empty range means the
//! anchor is not an ancestor of the head, or both name the same commit; both
//! are configuration problems rather than "nothing changed".

use std::path::Path;

use super::ChangelogError;
use crate::git::{Git, GitError};

/// Token identifying header chunks in raw log text.
pub const COMMIT_MARKER: &str = "commit";

/// Indent `git log` puts in front of message lines.
const MESSAGE_INDENT: &str = "    ";

/// Anything that can produce raw `git log anchor..head` text.
pub trait LogSource {
    /// Raw log of commits reachable from `head` but not from `anchor`.
    fn log_range(&self, anchor: &str, head: &str) -> Result<String, GitError>;
}

impl LogSource for Git {
    fn log_range(&self, anchor: &str, head: &str) -> Result<String, GitError> {
        Git::log_range(self, anchor, head)
    }
}

/// Reformat raw log text into a changelog body.
///
/// # Example
///
/// ```
/// use jenkins_changelog::changelog::history::reformat;
///
/// let raw = "commit 4f1c\nAuthor: A <a@x>\nDate:   Sat Mar 7 09:05:00 2026 +0800\n\n    Fix crash\n";
/// assert_eq!(reformat(raw), "Fix crash\n\n");
/// ```
pub fn reformat(raw: &str) -> String {
    let mut body = String::new();
    for chunk in raw.split("\n\n") {
        if chunk.contains(COMMIT_MARKER) || chunk.trim().is_empty() {
            continue;
        }
        let stripped: Vec<&str> = chunk
            .split('\n')
            .map(|line| line.strip_prefix(MESSAGE_INDENT).unwrap_or(line))
            .collect();
        body.push_str(&stripped.join("\n"));
        body.push('\n');
    }
    body
}

/// Extract the changelog body for `anchor..head` from `source`.
///
/// # Errors
///
/// - `ChangelogError::Git` if either revision cannot be resolved
/// - `ChangelogError::EmptyHistory` if the reformatted body is empty
pub fn extract_from(
    source: &dyn LogSource,
    anchor: &str,
    head: &str,
) -> Result<String, ChangelogError> {
    let raw = source.log_range(anchor, head)?;
    let body = reformat(&raw);
    if body.is_empty() {
        return Err(ChangelogError::EmptyHistory {
            anchor: anchor.to_string(),
            head: head.to_string(),
        });
    }
    tracing::debug!(anchor, head, bytes = body.len(), "extracted history");
    Ok(body)
}

/// Extract the changelog body for `anchor..head` from the repository at
/// `workspace`.
pub fn extract(anchor: &str, head: &str, workspace: &Path) -> Result<String, ChangelogError> {
    let git = Git::open(workspace)?;
    extract_from(&git, anchor, head)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLog(&'static str);

    impl LogSource for FixedLog {
        fn log_range(&self, _anchor: &str, _head: &str) -> Result<String, GitError> {
            Ok(self.0.to_string())
        }
    }

    const TWO_ENTRIES: &str = "\
commit 2222222222222222222222222222222222222222
Author: Test User <test@example.com>
Date:   Sat Mar 7 10:00:00 2026 +0800

    Add export button

commit 1111111111111111111111111111111111111111
Author: Test User <test@example.com>
Date:   Sat Mar 7 09:00:00 2026 +0800

    Fix crash on empty list
    when offline
";

    #[test]
    fn drops_headers_and_strips_indent() {
        assert_eq!(
            reformat(TWO_ENTRIES),
            "Add export button\nFix crash on empty list\nwhen offline\n\n"
        );
    }

    #[test]
    fn keeps_paragraphs_of_one_message_together() {
        let raw = "commit aaaa\nAuthor: A <a@x>\nDate:   d\n\n    Subject\n    \n    Details here\n";
        assert_eq!(reformat(raw), "Subject\n\nDetails here\n\n");
    }

    #[test]
    fn message_mentioning_marker_is_dropped_whole() {
        let raw = "commit aaaa\nAuthor: A <a@x>\nDate:   d\n\n    Keep this?\n    \n    Revert the last commit\n\n\
                   commit bbbb\nAuthor: A <a@x>\nDate:   d\n\n    Keep this\n";
        assert_eq!(reformat(raw), "Keep this\n\n");
    }

    #[test]
    fn strips_only_one_indent_level() {
        let raw = "commit aaaa\n\n        nested item\n";
        assert_eq!(reformat(raw), "    nested item\n\n");
    }

    #[test]
    fn empty_input_yields_empty_body() {
        assert_eq!(reformat(""), "");
        assert_eq!(reformat("\n\n\n"), "");
    }

    #[test]
    fn clean_single_entry_gains_trailing_newline() {
        assert_eq!(reformat("Fix bug"), "Fix bug\n");
    }

    #[test]
    fn extract_from_returns_body() {
        let body = extract_from(&FixedLog(TWO_ENTRIES), "a", "b").unwrap();
        assert!(body.starts_with("Add export button\n"));
    }

    #[test]
    fn extract_from_empty_range_fails() {
        let err = extract_from(&FixedLog(""), "abc", "abc").unwrap_err();
        assert!(matches!(err, ChangelogError::EmptyHistory { .. }));
    }

    #[test]
    fn extract_from_headers_only_fails() {
        let raw = "commit aaaa\nAuthor: A <a@x>\nDate:   d\n\n    Initial commit\n";
        let err = extract_from(&FixedLog(raw), "a", "b").unwrap_err();
        assert!(matches!(err, ChangelogError::EmptyHistory { .. }));
    }

    #[test]
    fn extract_outside_repo_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = extract("a", "b", dir.path()).unwrap_err();
        assert!(matches!(err, ChangelogError::Git(GitError::NotARepo { .. })));
    }
}

//! changelog::compose
//!
//! Assembly and persistence of the final changelog text.
//!
//! # Composition Order
//!
//! 1. A non-empty operator note is placed before the body, separated by a
//!    newline.
//! 2. A non-empty branch gets a banner line and a blank line in front.
//! 3. In release mode all of the above is replaced by the operator note
//!    alone, which may be empty.

use std::fs;
use std::path::{Path, PathBuf};

use super::ChangelogError;

/// File name of the generated changelog.
pub const OUTPUT_FILE: &str = "git.log";

/// Mode whose changelog shows operator notes only.
pub const RELEASE_MODE: &str = "release";

/// Prefix of the banner line naming the built branch.
pub const BRANCH_BANNER: &str = "代码分支: ";

/// Whether `mode` is the release mode.
pub fn is_release_mode(mode: &str) -> bool {
    mode == RELEASE_MODE
}

/// Compose the changelog text.
///
/// # Example
///
/// ```
/// use jenkins_changelog::changelog::compose::compose;
///
/// assert_eq!(compose("fix bug\n", "main", "", false), "代码分支: main\n\nfix bug\n");
/// assert_eq!(compose("X", "main", "notes", true), "notes");
/// ```
pub fn compose(body: &str, branch: &str, custom_log: &str, release: bool) -> String {
    if release {
        return custom_log.to_string();
    }

    let mut text = body.to_string();
    if !custom_log.is_empty() {
        text = format!("{}\n{}", custom_log, text);
    }
    if !branch.is_empty() {
        text = format!("{}{}\n\n{}", BRANCH_BANNER, branch, text);
    }
    text
}

/// Write `text` to `git.log` inside `dir`, replacing any existing file.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns `ChangelogError::Io` if the old file cannot be removed or the
/// new one cannot be written.
pub fn write_changelog(dir: &Path, text: &str) -> Result<PathBuf, ChangelogError> {
    let path = dir.join(OUTPUT_FILE);
    let io_err = |source: std::io::Error| ChangelogError::Io {
        path: path.clone(),
        source,
    };

    if path.exists() {
        fs::remove_file(&path).map_err(io_err)?;
    }
    fs::write(&path, text.as_bytes()).map_err(io_err)?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote changelog");
    Ok(path)
}

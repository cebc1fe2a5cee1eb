//! cli::commands::generate
//!
//! Generate `git.log` for the running build.
//!
//! # Design
//!
//! - A preset `CHANGE_LOG` means the notes already exist; nothing is done
//! - The anchor search talks to Jenkins; everything after it is local
//! - "No anchor" still writes a file (banner and notes only) and succeeds
//!
//! # Example
//!
//! ```bash
//! # In a Jenkins shell step
//! jvcl generate
//!
//! # Preview without touching git.log
//! jvcl generate --dry-run
//! ```

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::changelog::{self, compose};
use crate::ci::jenkins::JenkinsClient;
use crate::ci::BuildSource;
use crate::core::config::{self, Settings};
use crate::core::types::{AnchorSource, WINDOW_SIZE};
use crate::ui::output::{self, Verbosity};

/// Run the generate command.
///
/// This is a synchronous wrapper that uses tokio to run the build search.
pub fn generate(verbosity: Verbosity, dry_run: bool) -> Result<()> {
    if config::preset_changelog_from_env().is_some() {
        output::print(
            "CHANGE_LOG is already set; skipping changelog generation",
            verbosity,
        );
        return Ok(());
    }

    let settings = Settings::from_env().context("failed to read the job environment")?;

    let client = JenkinsClient::from_settings(&settings.ci)?;
    run(&settings, &client, verbosity, dry_run)?;
    Ok(())
}

/// Generate with an explicit build source.
///
/// Returns the path written, or `None` for a dry run.
pub fn run(
    settings: &Settings,
    source: &dyn BuildSource,
    verbosity: Verbosity,
    dry_run: bool,
) -> Result<Option<PathBuf>> {
    let rt = tokio::runtime::Runtime::new()?;
    let generated = rt.block_on(changelog::generate(settings, source))?;

    match &generated.anchor {
        Some(anchor) => match anchor.source {
            AnchorSource::Override => output::print(
                format!("Changes since {} (LAST_BUILD_COMMIT)", anchor.commit),
                verbosity,
            ),
            AnchorSource::Build(id) => output::print(
                format!("Changes since build #{} ({})", id, anchor.commit),
                verbosity,
            ),
        },
        None => output::warn(
            format!(
                "no successful {}/{} build with version <= {} in the last {} builds; \
                 changelog has no history",
                settings.branch,
                settings.mode,
                settings.version,
                WINDOW_SIZE
            ),
            verbosity,
        ),
    }

    if dry_run {
        print!("{}", generated.text);
        return Ok(None);
    }

    let path = compose::write_changelog(&settings.output_dir, &generated.text)?;
    output::print(format!("Wrote {}", path.display()), verbosity);
    Ok(Some(path))
}

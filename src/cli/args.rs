//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//!
//! Everything else the tool needs comes from the Jenkins job environment,
//! see [`crate::core::config`].

use clap::{Parser, Subcommand};

/// jvcl - Generate a release changelog for the running Jenkins build
#[derive(Parser, Debug)]
#[command(name = "jvcl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Defaults to `generate` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Generate git.log for the running build
    #[command(
        long_about = "Generate git.log for the running build.\n\n\
            Searches the previous 20 builds of this job for the most recent \
            successful build of the same BRANCH and MODE whose BUILD_NAME is not \
            newer than the current one, then writes the git history between that \
            build's commit and GIT_COMMIT to git.log in $PWD.",
        after_help = "\
ENVIRONMENT:
    Required: BRANCH MODE BUILD_NAME BUILD_ID WORKSPACE GIT_COMMIT
              JOB_URL JENKINS_USERNAME JENKINS_PASSWORD
    Optional: LAST_BUILD_COMMIT  anchor commit, skips the build search
              GIT_LOG            operator notes placed above the history
              CHANGE_LOG         preset changelog, nothing is generated
              PWD                directory receiving git.log"
    )]
    Generate {
        /// Print the changelog instead of writing git.log
        #[arg(long)]
        dry_run: bool,
    },

    /// Show what the CI server reports for one build
    Inspect {
        /// Build number to fetch
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        build_id: u64,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

//! jvcl binary entry point.

use std::process::ExitCode;

use jenkins_changelog::cli;
use jenkins_changelog::ui::output;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

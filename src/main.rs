//! rlens binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match repolens::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            repolens::ui::output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

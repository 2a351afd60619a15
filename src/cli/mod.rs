use std::process::ExitCode;

use anyhow::Result;

pub use args::{Arguments, CheckCommand, Command, OutputFormat};
pub use exit_status::ExitStatus;
pub use logging::init_logging;

mod args;
pub mod commands;
mod exit_status;
mod logging;
pub mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    init_logging(args.verbosity());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(ExitStatus::from_error_count(result.error_count).into())
}

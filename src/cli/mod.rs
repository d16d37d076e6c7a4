use std::process::ExitCode;

use anyhow::Result;

pub mod args;
mod exit_code;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_code::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(args)?;
    report::print(&result);

    Ok(exit_code::exit_status_from_result(&result).into())
}

//! Command dispatch for the proplint CLI.

use std::{fs, path::Path};

use anyhow::Result;

use super::args::{Arguments, Command};
use crate::commands::{
    CommandSummary, InitSummary, RunResult, check::check, clean::clean, merge::merge,
};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn run(Arguments { command }: Arguments) -> Result<RunResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Clean(cmd)) => clean(cmd),
        Some(Command::Merge(cmd)) => merge(cmd),
        Some(Command::Init) => {
            init()?;
            Ok(RunResult {
                summary: CommandSummary::Init(InitSummary { created: true }),
                error_count: 0,
                warning_count: 0,
                exit_on_errors: true,
                issues: Vec::new(),
                parse_error_count: 0,
                bundles_checked: 0,
                files_checked: 0,
            })
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}

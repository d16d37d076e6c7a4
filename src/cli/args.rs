//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! proplint commands. It uses clap's derive API for declarative
//! argument parsing.
//!
//! ## Commands
//!
//! - `check`: Run bundle checks (orphan keys, missing overrides, ...)
//! - `clean`: Remove orphan override keys from properties files
//! - `merge`: Apply locale overrides and export resolved bundles
//! - `init`: Initialize proplint configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::commands::check::CheckRule;
use crate::commands::merge::MergeFormat;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Bundles root directory (overrides config file)
    #[arg(long)]
    pub bundles_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually delete keys (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub args: CleanArgs,
}

#[derive(Debug, Parser)]
pub struct MergeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for resolved bundles
    #[arg(long)]
    pub out: PathBuf,

    /// Locales to merge (default: all locales that have override files)
    /// Can be specified multiple times: --locale de --locale fr
    #[arg(long = "locale")]
    pub locales: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: MergeFormat,
}

#[derive(Debug, Args)]
pub struct MergeCommand {
    #[command(flatten)]
    pub args: MergeArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check bundles for issues (orphan keys, missing overrides, untranslated values, ...)
    Check(CheckCommand),
    /// Remove orphan override keys from properties files
    Clean(CleanCommand),
    /// Apply locale overrides onto base bundles and export the resolved files
    Merge(MergeCommand),
    /// Initialize a new .proplintrc.json configuration file
    Init,
}

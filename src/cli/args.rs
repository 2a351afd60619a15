//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Lint catalogs, optionally restricted to the entries of a patch
//! - `init`: Write a default `.polintrc.json`

use std::path::PathBuf;

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum};

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

    /// Number of `-v` flags given to the command.
    pub fn verbosity(&self) -> u8 {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init(cmd)) => cmd.common.verbose,
            None => 0,
        }
    }
}

/// Arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Cargo-style human readable output
    #[default]
    Human,
    /// One JSON document on stdout
    Json,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Catalogs or directories to check (default: current directory)
    pub paths: Vec<PathBuf>,

    /// Unified diff restricting the report to the entries it touches
    #[arg(long, env = "POLINT_DIFF")]
    pub diff: Option<PathBuf>,

    /// Directory the file names of the diff are relative to
    #[arg(long, requires = "diff")]
    pub diff_root: Option<PathBuf>,

    /// Skip the grammar and spelling checker
    #[arg(long)]
    pub no_grammar: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check translation catalogs
    Check(CheckCommand),
    /// Initialize a new .polintrc.json configuration file
    Init(InitCommand),
}

//! Dispatch to the command handler matching the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with error/warning counts
//! - `Err` if the command fails (e.g., invalid config, unreadable diff)

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init(_)) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}

//! Dispatch a parsed command line to its command handler.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{check::check, fmt::fmt, init::init, lookup::lookup, stats::stats},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Stats(cmd)) => stats(cmd),
        Some(Command::Lookup(cmd)) => lookup(cmd),
        Some(Command::Fmt(cmd)) => fmt(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

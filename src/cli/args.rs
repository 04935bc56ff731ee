//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Run catalogue integrity rules
//! - `stats`: Show translation completeness per catalogue
//! - `lookup`: Resolve one message the way the application would
//! - `fmt`: Rewrite catalogues in canonical lupdate layout
//! - `init`: Initialize tsglot configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;

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

    /// Get the verbose flag from the command's arguments.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Stats(cmd)) => cmd.common.verbose,
            Some(Command::Fmt(cmd)) => cmd.common.verbose,
            Some(Command::Lookup(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that scan a project.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory, where the config file is searched from
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Directory containing .ts catalogues (overrides config file)
    #[arg(long)]
    pub translations_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub rules: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct StatsCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Catalogue file to load
    pub file: PathBuf,

    /// Context name (e.g. "docks::Navigator")
    pub context: String,

    /// Source text to translate
    pub source: String,

    /// Disambiguation comment
    #[arg(short, long, default_value = "")]
    pub disambiguation: String,

    /// Quantity for numerus messages; substitutes %n
    #[arg(short = 'n', long = "count", allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct FmtCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check catalogues for integrity issues (unfinished, numerus, placeholders, ...)
    Check(CheckCommand),
    /// Show translation completeness for each catalogue
    Stats(StatsCommand),
    /// Look up a translation with fallback to the source text
    Lookup(LookupCommand),
    /// Rewrite catalogues in canonical lupdate layout
    Fmt(FmtCommand),
    /// Initialize a new .tsglotrc.json configuration file
    Init,
}

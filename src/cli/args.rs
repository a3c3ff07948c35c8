//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! Flags must come before the command name; everything from the command
//! name on is passed through untouched.
//!
//! - `--help`: Same as `rvn help` (or `rvn help <command>`)
//! - `--version`: Show version
//! - `--trace`: Trace discovery and the command body
//! - `--quiet` / `-q`: Errors only (conflicts with `--trace`)
//! - `--cwd <dir>`: Run as if started in that directory
//! - `--root <dir>`: Root boundary for discovery (default: home directory)

use clap::Parser;
use std::path::PathBuf;

/// Raven - run the commands defined in Ravenfiles from here up to your root
#[derive(Parser, Debug)]
#[command(name = "rvn")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Show available commands, or help for one command
    #[arg(long = "help")]
    pub help_flag: bool,

    /// Trace discovery and the invoked command
    #[arg(long, conflicts_with = "quiet")]
    pub trace: bool,

    /// Errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Run as if rvn was started in this directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Root boundary directory for Ravenfile discovery
    #[arg(long, env = "RAVEN_ROOT", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Command to run, followed by its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }

    /// The argument vector handed to the dispatcher.
    ///
    /// `--help` becomes a leading `help` keyword.
    pub fn dispatch_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        if self.help_flag {
            args.push(crate::engine::dispatch::HELP.to_string());
        }
        args.extend(self.args.iter().cloned());
        args
    }
}

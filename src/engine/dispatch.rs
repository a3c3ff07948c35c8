//! engine::dispatch
//!
//! Routes a command line to help output or to a registered command.
//!
//! # Forms
//!
//! ```text
//! help              general listing, exit 0
//! help <cmd>        full help for one command, exit 0 (2 if unknown)
//! init              built-in: create a starter Ravenfile
//! <cmd> [args...]   invoke the command, exit with its status
//! ```
//!
//! An unrecognized command prints an error followed by the general listing
//! and exits 2. A name with the private shape exits 1 without lookup.

use std::io::{self, Write};

use thiserror::Error;

use crate::core::overlay::Overlay;
use crate::core::registry::CommandRegistry;
use crate::core::types::{is_private, CommandName};
use crate::engine::init;
use crate::engine::runner::{Invocation, RunError, Runner};
use crate::engine::Context;
use crate::ui::output;

/// The help keyword.
pub const HELP: &str = "help";

/// The built-in init command.
pub const INIT: &str = "init";

/// Errors from dispatching a command line.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("missing command")]
    MissingCommand,

    #[error("unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    #[error("unrecognized command '{0}'")]
    UnknownHelpTopic(String),

    #[error("'{0}' is a private command and cannot be invoked directly")]
    PrivateCommand(String),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::MissingCommand
            | DispatchError::UnrecognizedCommand(_)
            | DispatchError::UnknownHelpTopic(_) => 2,
            DispatchError::PrivateCommand(_)
            | DispatchError::Run(_)
            | DispatchError::Io(_) => 1,
        }
    }

    /// Whether the general listing follows the error message.
    pub fn shows_listing(&self) -> bool {
        matches!(
            self,
            DispatchError::MissingCommand | DispatchError::UnrecognizedCommand(_)
        )
    }
}

/// Dispatcher over a fully loaded overlay.
pub struct Dispatcher<'a> {
    overlay: Overlay,
    runner: &'a dyn Runner,
    ctx: &'a Context,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher. The overlay is owned and never mutated again.
    pub fn new(overlay: Overlay, runner: &'a dyn Runner, ctx: &'a Context) -> Self {
        Self {
            overlay,
            runner,
            ctx,
        }
    }

    /// The registry being dispatched against.
    pub fn registry(&self) -> &CommandRegistry {
        &self.overlay.registry
    }

    /// Public command names in first-introduced order.
    pub fn list_public_commands(&self) -> &[CommandName] {
        self.registry().public_commands()
    }

    /// One-line summary for a command.
    pub fn summary(&self, name: &CommandName) -> &str {
        self.registry().summary(name)
    }

    /// Full help for a command.
    pub fn full_help(&self, name: &CommandName) -> Vec<&str> {
        self.registry().full_help(name)
    }

    /// Write the general listing.
    pub fn write_general_help<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Available commands:")?;
        for name in self.list_public_commands() {
            writeln!(out, "{} -{}", name, self.summary(name))?;
        }
        Ok(())
    }

    /// Write the full help for one public command.
    pub fn write_command_help<W: Write>(
        &self,
        name: &CommandName,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "{}:", name)?;
        for line in self.full_help(name) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Resolve a raw token to a public command.
    ///
    /// # Errors
    ///
    /// - `DispatchError::PrivateCommand` if the token has the private shape
    /// - `DispatchError::UnrecognizedCommand` if no public command matches
    pub fn resolve(&self, raw: &str) -> Result<CommandName, DispatchError> {
        if is_private(raw) {
            return Err(DispatchError::PrivateCommand(raw.to_string()));
        }
        CommandName::new(raw)
            .ok()
            .filter(|name| self.registry().contains(name))
            .ok_or_else(|| DispatchError::UnrecognizedCommand(raw.to_string()))
    }

    /// Dispatch without reporting errors.
    ///
    /// Returns the exit code of a successful dispatch: 0 for help and
    /// built-ins, the command's own status otherwise.
    pub fn try_dispatch<W: Write>(
        &self,
        args: &[String],
        out: &mut W,
    ) -> Result<i32, DispatchError> {
        let Some((first, rest)) = args.split_first() else {
            return Err(DispatchError::MissingCommand);
        };

        match (first.as_str(), rest.first()) {
            (HELP, None) => {
                self.write_general_help(out)?;
                Ok(0)
            }
            (HELP, Some(topic)) => {
                let name = CommandName::new(topic)
                    .ok()
                    .filter(|name| !is_private(topic) && self.registry().contains(name))
                    .ok_or_else(|| DispatchError::UnknownHelpTopic(topic.clone()))?;
                self.write_command_help(&name, out)?;
                Ok(0)
            }
            (INIT, _) => init::init(&self.ctx.cwd, out),
            (raw, _) => self.invoke(raw, rest),
        }
    }

    /// Dispatch a command line, reporting errors to `err`.
    ///
    /// Always yields a process exit code.
    pub fn dispatch<O: Write, E: Write>(
        &self,
        args: &[String],
        out: &mut O,
        err: &mut E,
    ) -> i32 {
        match self.try_dispatch(args, out) {
            Ok(code) => code,
            Err(e) => {
                writeln!(err, "error: {}", e).ok();
                if e.shows_listing() {
                    self.write_general_help(out).ok();
                }
                e.exit_code()
            }
        }
    }

    fn invoke(&self, raw: &str, args: &[String]) -> Result<i32, DispatchError> {
        let name = self.resolve(raw)?;
        let binding = self
            .registry()
            .binding(&name)
            .ok_or_else(|| DispatchError::UnrecognizedCommand(raw.to_string()))?;

        output::debug(
            format!(
                "invoking '{}' from {} with {} argument(s)",
                binding.function,
                binding.source.display(),
                args.len()
            ),
            self.ctx.verbosity,
        );

        let code = self.runner.invoke(&Invocation {
            function: &binding.function,
            args,
            sources: &self.overlay.files,
            root: &self.ctx.root,
            cwd: &self.ctx.cwd,
            trace: self.ctx.verbosity.is_debug(),
        })?;

        output::debug(format!("'{}' exited with {}", name, code), self.ctx.verbosity);
        Ok(code)
    }
}

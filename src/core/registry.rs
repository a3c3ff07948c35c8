//! core::registry
//!
//! The command registry: public command names, their help, and their bindings.
//!
//! # Model
//!
//! Help and bindings are kept in separate maps keyed by [`CommandName`].
//! Every header records its [`HelpEntry`] under the normalized name, so a
//! later file that redefines `BUILD` or `build` replaces the help for
//! `build` wholesale, never merged. Only public identifiers get a
//! [`Binding`], and only bound names are listed or dispatched.
//!
//! # Visibility
//!
//! Names that were already present in the baseline (the built-in commands)
//! are never exposed, even if a definitions file declares them. Private
//! identifiers (leading upper-case letter) are never bound.
//!
//! # Ordering
//!
//! [`CommandRegistry::public_commands`] yields names in the order their
//! bindings were first introduced. Redefinition keeps the original slot.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::core::types::{is_public_identifier, CommandName};

/// Summary and full-help fallback text.
pub const NO_HELP: &str = "no help available";

/// Names present before any definitions file is loaded.
pub const BUILTIN_COMMANDS: [&str; 2] = ["help", "init"];

/// Help lines attached to one command.
///
/// An empty entry is valid: the command exists but nobody documented it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpEntry(Vec<String>);

impl HelpEntry {
    /// Create a help entry from lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }

    /// The stored lines.
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Whether the entry has no lines.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First line if it is non-empty, otherwise [`NO_HELP`].
    pub fn summary(&self) -> &str {
        match self.0.first() {
            Some(line) if !line.is_empty() => line,
            _ => NO_HELP,
        }
    }

    /// All lines, or a single [`NO_HELP`] line if the entry is empty.
    pub fn full(&self) -> Vec<&str> {
        if self.0.is_empty() {
            vec![NO_HELP]
        } else {
            self.0.iter().map(String::as_str).collect()
        }
    }
}

/// The invocable unit behind a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Function identifier as written in the definitions file.
    pub function: String,
    /// Definitions file that last defined the function.
    pub source: PathBuf,
}

/// Outcome of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The name was not known before.
    Introduced(CommandName),
    /// The name existed; binding and help were replaced.
    Replaced {
        name: CommandName,
        previous: PathBuf,
    },
    /// The identifier is private, built-in, or outside the public shape.
    ///
    /// Help is still recorded when the identifier normalizes.
    Ignored,
}

/// Mapping from public command names to help and bindings.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    baseline: BTreeSet<CommandName>,
    order: Vec<CommandName>,
    bindings: HashMap<CommandName, Binding>,
    help: HashMap<CommandName, HelpEntry>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Create an empty registry whose baseline is [`BUILTIN_COMMANDS`].
    pub fn new() -> Self {
        Self::with_baseline(BUILTIN_COMMANDS)
    }

    /// Create an empty registry with an explicit baseline of reserved names.
    pub fn with_baseline<I, S>(baseline: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            baseline: baseline
                .into_iter()
                .filter_map(|name| CommandName::new(name).ok())
                .collect(),
            order: Vec::new(),
            bindings: HashMap::new(),
            help: HashMap::new(),
        }
    }

    /// Register a function and its help from a definitions file.
    pub fn define(&mut self, function: &str, help: Vec<String>, source: &Path) -> Registration {
        let Ok(name) = CommandName::new(function) else {
            return Registration::Ignored;
        };
        self.help.insert(name.clone(), HelpEntry::new(help));

        if !is_public_identifier(function) || self.baseline.contains(&name) {
            return Registration::Ignored;
        }

        let binding = Binding {
            function: function.to_string(),
            source: source.to_path_buf(),
        };

        match self.bindings.insert(name.clone(), binding) {
            Some(previous) => Registration::Replaced {
                name,
                previous: previous.source,
            },
            None => {
                self.order.push(name.clone());
                Registration::Introduced(name)
            }
        }
    }

    /// Public command names in first-introduced order.
    pub fn public_commands(&self) -> &[CommandName] {
        &self.order
    }

    /// Whether `name` is a dispatchable public command.
    pub fn contains(&self, name: &CommandName) -> bool {
        self.bindings.contains_key(name)
    }

    /// Whether `name` was reserved before loading.
    pub fn is_builtin(&self, name: &CommandName) -> bool {
        self.baseline.contains(name)
    }

    /// Binding for a public command.
    pub fn binding(&self, name: &CommandName) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Help entry last recorded for `name`, public or not.
    pub fn help(&self, name: &CommandName) -> Option<&HelpEntry> {
        self.help.get(name)
    }

    /// One-line summary; unknown names fall back to [`NO_HELP`].
    pub fn summary(&self, name: &CommandName) -> &str {
        self.help(name).map_or(NO_HELP, HelpEntry::summary)
    }

    /// Full help lines; unknown or undocumented names fall back to [`NO_HELP`].
    pub fn full_help(&self, name: &CommandName) -> Vec<&str> {
        self.help(name).map_or_else(|| vec![NO_HELP], HelpEntry::full)
    }

    /// Number of public commands.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no public command is registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

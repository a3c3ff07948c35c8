//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Diagnostics go to stderr and respect the verbosity chosen by the CLI
//! flags. `--trace` selects [`Verbosity::Debug`]; `--quiet` selects
//! [`Verbosity::Quiet`]. Errors are always shown.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - loader and dispatch tracing
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, trace: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if trace {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    /// Whether debug output is enabled.
    pub fn is_debug(self) -> bool {
        self == Verbosity::Debug
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

//! engine
//!
//! Executes a command line against a loaded overlay.
//!
//! # Architecture
//!
//! The engine runs after the registry is complete:
//!
//! ```text
//! Load (core::overlay) -> Dispatch -> Invoke (Runner) -> exit status
//! ```
//!
//! - [`dispatch`] - Help views, validation and routing
//! - [`runner`] - The seam that evaluates definitions and invokes commands
//! - [`init`] - The built-in `init` command
//!
//! # Invariants
//!
//! - The registry is immutable once a [`dispatch::Dispatcher`] owns it
//! - A command's exit status is returned unchanged

pub mod dispatch;
pub mod init;
pub mod runner;

pub use dispatch::{DispatchError, Dispatcher};
pub use runner::{Invocation, RunError, Runner, ShellRunner};

use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Execution context shared by loading and dispatch.
#[derive(Debug, Clone)]
pub struct Context {
    /// Root boundary directory (canonical).
    pub root: PathBuf,
    /// Working directory (canonical, inside `root`).
    pub cwd: PathBuf,
    /// Diagnostic verbosity.
    pub verbosity: Verbosity,
}

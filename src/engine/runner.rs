//! engine::runner
//!
//! Evaluation of definitions files and invocation of bound commands.
//!
//! # Design
//!
//! The [`Runner`] trait is the seam between the dispatcher and whatever
//! actually evaluates definitions. [`ShellRunner`] is the production
//! implementation: it syntax-checks files with `<shell> -n` and invokes a
//! command by starting one shell that sources every loaded file in overlay
//! order, then calls the bound function with the caller's arguments.
//!
//! The generated script is plain POSIX (`.` and single-quoted words), so any
//! `sh`-compatible shell can be configured. Arguments are quoted into the
//! script itself and the shell gets no positional parameters, so
//! definitions files always see an empty `$@`.
//!
//! Invocation is synchronous. The child inherits stdio and runs to
//! completion; its exit status is returned untouched.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;

/// Errors from evaluating definitions or invoking commands.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{message}")]
    Syntax { message: String },
}

/// Everything a runner needs to invoke one command.
#[derive(Debug, Clone)]
pub struct Invocation<'a> {
    /// Function identifier to call.
    pub function: &'a str,
    /// Arguments passed through to the function.
    pub args: &'a [String],
    /// Definitions files in overlay order.
    pub sources: &'a [PathBuf],
    /// Root boundary directory.
    pub root: &'a Path,
    /// Working directory the command runs in.
    pub cwd: &'a Path,
    /// Trace the command body.
    pub trace: bool,
}

/// Evaluates definitions files and invokes commands.
pub trait Runner {
    /// Check a definitions file without running it.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Syntax` if the file cannot be evaluated.
    fn check(&self, file: &Path) -> Result<(), RunError>;

    /// Invoke a command and return its exit status.
    fn invoke(&self, invocation: &Invocation<'_>) -> Result<i32, RunError>;
}

/// Runner backed by a POSIX-style shell (default `bash`).
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new("bash")
    }
}

impl ShellRunner {
    /// Create a runner that uses `program` as the shell.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The shell program.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        Command::new(&self.program)
    }

    fn spawn_error(&self, source: std::io::Error) -> RunError {
        RunError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Runner for ShellRunner {
    fn check(&self, file: &Path) -> Result<(), RunError> {
        let output = self
            .command()
            .arg("-n")
            .arg(file)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => format!(
                "{} exited with status {}",
                self.program,
                exit_code(output.status)
            ),
            text => text.to_string(),
        };
        Err(RunError::Syntax { message })
    }

    fn invoke(&self, invocation: &Invocation<'_>) -> Result<i32, RunError> {
        let script = invocation_script(invocation);

        let status = self
            .command()
            .arg("-c")
            .arg(&script)
            .arg("rvn")
            .current_dir(invocation.cwd)
            .env("RAVEN_ROOT", invocation.root)
            .env("RAVEN_CWD", invocation.cwd)
            .status()
            .map_err(|e| self.spawn_error(e))?;

        Ok(exit_code(status))
    }
}

/// Build the script that sources definitions and calls the command.
pub fn invocation_script(invocation: &Invocation<'_>) -> String {
    let mut script = String::new();
    for source in invocation.sources {
        script.push_str(". ");
        script.push_str(&shell_quote(&source.to_string_lossy()));
        script.push('\n');
    }
    if invocation.trace {
        script.push_str("set -x\n");
    }
    script.push_str(invocation.function);
    for arg in invocation.args {
        script.push(' ');
        script.push_str(&shell_quote(arg));
    }
    script.push('\n');
    script
}

/// Quote a string for a POSIX shell using single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Translate a child exit status into a single integer.
///
/// A child killed by a signal reports `128 + signal`, the shell convention.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fake for the runner seam.

    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// A call captured by [`RecordingRunner`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Call {
        pub function: String,
        pub args: Vec<String>,
        pub sources: Vec<PathBuf>,
        pub cwd: PathBuf,
    }

    /// Runner that records invocations and returns a fixed status.
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        pub status: i32,
        pub broken: HashSet<PathBuf>,
        pub calls: RefCell<Vec<Call>>,
        pub checked: RefCell<Vec<PathBuf>>,
    }

    impl RecordingRunner {
        pub fn returning(status: i32) -> Self {
            Self {
                status,
                ..Default::default()
            }
        }
    }

    impl Runner for RecordingRunner {
        fn check(&self, file: &Path) -> Result<(), RunError> {
            self.checked.borrow_mut().push(file.to_path_buf());
            if self.broken.contains(file) {
                return Err(RunError::Syntax {
                    message: "syntax error near unexpected token".into(),
                });
            }
            Ok(())
        }

        fn invoke(&self, invocation: &Invocation<'_>) -> Result<i32, RunError> {
            self.calls.borrow_mut().push(Call {
                function: invocation.function.to_string(),
                args: invocation.args.to_vec(),
                sources: invocation.sources.to_vec(),
                cwd: invocation.cwd.to_path_buf(),
            });
            Ok(self.status)
        }
    }
}

//! cli
//!
//! Command-line interface layer for Raven.
//!
//! # Responsibilities
//!
//! - Parse global flags and collect the command line
//! - Resolve the root boundary and working directory
//! - Build the registry, dispatch, and show the one-time PATH notice
//!
//! # Architecture
//!
//! The CLI layer is thin. Discovery lives in [`crate::core::overlay`] and
//! routing in [`crate::engine::dispatch`]; this module only wires them up
//! and turns the outcome into a process exit code.

pub mod args;

pub use args::Cli;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::overlay;
use crate::engine::dispatch::INIT;
use crate::engine::{Context, Dispatcher, ShellRunner};
use crate::notice::{self, Advice, FileMarker};
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// Returns the process exit code. Usage errors from argument parsing are
/// printed here; any other `Err` should be reported and mapped to exit 1.
pub fn run() -> Result<i32> {
    let cli = match Cli::try_parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().context("failed to print usage")?;
            return Ok(e.exit_code());
        }
    };

    let verbosity = Verbosity::from_flags(cli.quiet, cli.trace);
    let config = Config::load()?;
    if let Some(path) = config.loaded_from() {
        output::debug(format!("config loaded from {}", path.display()), verbosity);
    }

    let ctx = resolve_context(&cli, &config, verbosity)?;
    output::debug(
        format!("root {} -> cwd {}", ctx.root.display(), ctx.cwd.display()),
        verbosity,
    );

    let runner = ShellRunner::new(config.shell());
    let overlay = overlay::load(&ctx.root, &ctx.cwd, &runner, verbosity)?;

    let args = cli.dispatch_args();
    let dispatcher = Dispatcher::new(overlay, &runner, &ctx);
    let code = dispatcher.dispatch(&args, &mut io::stdout().lock(), &mut io::stderr().lock());

    let is_init = args.first().is_some_and(|a| a == INIT);
    if code == 0 && !is_init && config.advise() && verbosity != Verbosity::Quiet {
        advise(verbosity);
    }

    Ok(code)
}

/// Resolve and canonicalize the root boundary and working directory.
///
/// Root precedence: `--root` / `$RAVEN_ROOT`, then config, then home.
fn resolve_context(cli: &Cli, config: &Config, verbosity: Verbosity) -> Result<Context> {
    let root = match cli.root.clone().or_else(|| config.root().map(Path::to_path_buf)) {
        Some(root) => root,
        None => dirs::home_dir().context("cannot determine home directory")?,
    };
    let cwd = match &cli.cwd {
        Some(cwd) => cwd.clone(),
        None => std::env::current_dir().context("cannot determine working directory")?,
    };

    let root = canonical(&root, "root")?;
    let cwd = canonical(&cwd, "working")?;
    overlay::check_boundary(&root, &cwd)?;

    Ok(Context {
        root,
        cwd,
        verbosity,
    })
}

fn canonical(path: &Path, what: &str) -> Result<PathBuf> {
    path.canonicalize()
        .with_context(|| format!("{} directory '{}' is not accessible", what, path.display()))
}

/// Show the PATH notice once; failures are reported at debug level only.
fn advise(verbosity: Verbosity) {
    let result = FileMarker::new().and_then(|marker| {
        notice::advise_once(&marker, &Advice::from_env(), &mut io::stderr().lock())
    });
    if let Err(e) = result {
        output::debug(format!("skipping PATH notice: {}", e), verbosity);
    }
}

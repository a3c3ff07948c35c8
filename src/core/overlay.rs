//! core::overlay
//!
//! Discovery and overlay-merge of definitions files.
//!
//! # Directory Chain
//!
//! The chain runs from the root boundary down to the working directory, one
//! level at a time, inclusive of both ends. The working directory must be
//! the root or a descendant of it.
//!
//! # Discovery
//!
//! At each level the loader collects regular files named `Ravenfile` or
//! `Ravenfile.<anything>`, sorted by file name. A missing directory or a
//! level with no matches is skipped.
//!
//! # Overlay
//!
//! Files load root-first, working-directory-last, lexical within a level.
//! Each file is checked by the [`Runner`] and then scanned for definitions;
//! every definition registers its binding and help together, so the last
//! file to define a command wins outright.
//!
//! The same filesystem state always produces the same registry.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::core::extract::extract;
use crate::core::registry::{CommandRegistry, Registration};
use crate::engine::runner::{RunError, Runner};
use crate::ui::output::{self, Verbosity};

/// Base name of a definitions file.
pub const DEFINITIONS_FILE: &str = "Ravenfile";

/// Errors from building the registry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("working directory '{cwd}' is not inside the root directory '{root}'")]
    Boundary { root: PathBuf, cwd: PathBuf },

    #[error("failed to read '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to load '{path}': {message}")]
    Syntax { path: PathBuf, message: String },

    #[error(transparent)]
    Run(#[from] RunError),
}

impl LoadError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// The result of loading: the registry and the files that produced it.
#[derive(Debug, Clone)]
pub struct Overlay {
    /// Public commands with help and bindings.
    pub registry: CommandRegistry,
    /// Every loaded definitions file, in load order.
    pub files: Vec<PathBuf>,
}

/// Check that `cwd` equals `root` or lies beneath it.
///
/// Both paths are compared as given; callers canonicalize first.
///
/// # Errors
///
/// Returns `LoadError::Boundary` if `cwd` is outside `root`.
pub fn check_boundary(root: &Path, cwd: &Path) -> Result<(), LoadError> {
    if cwd.starts_with(root) {
        Ok(())
    } else {
        Err(LoadError::Boundary {
            root: root.to_path_buf(),
            cwd: cwd.to_path_buf(),
        })
    }
}

/// List the directory levels from `root` to `cwd`, inclusive.
///
/// Assumes [`check_boundary`] has passed.
pub fn directory_chain(root: &Path, cwd: &Path) -> Vec<PathBuf> {
    let mut chain = vec![root.to_path_buf()];
    let Ok(rest) = cwd.strip_prefix(root) else {
        return chain;
    };

    let mut current = root.to_path_buf();
    for component in rest.components() {
        if let Component::Normal(part) = component {
            current.push(part);
            chain.push(current.clone());
        }
    }
    chain
}

/// Whether a file name qualifies as a definitions file.
pub fn is_definitions_file(name: &str) -> bool {
    match name.strip_prefix(DEFINITIONS_FILE) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// Find the definitions files in one directory, sorted by file name.
///
/// # Errors
///
/// Returns `LoadError::Read` for I/O failures other than a missing directory.
pub fn definitions_in(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(LoadError::Read {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoadError::Read {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let qualifies = entry
            .file_name()
            .to_str()
            .is_some_and(is_definitions_file);
        if qualifies && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Build the command registry for `cwd` under `root`.
///
/// # Errors
///
/// - `LoadError::Boundary` if `cwd` is outside `root`
/// - `LoadError::Read` if a directory or file cannot be read
/// - `LoadError::Syntax` if the runner rejects a definitions file
pub fn load(
    root: &Path,
    cwd: &Path,
    runner: &dyn Runner,
    verbosity: Verbosity,
) -> Result<Overlay, LoadError> {
    check_boundary(root, cwd)?;

    let mut registry = CommandRegistry::new();
    let mut files = Vec::new();

    for dir in directory_chain(root, cwd) {
        output::debug(format!("scanning {}", dir.display()), verbosity);

        for path in definitions_in(&dir)? {
            load_file(&path, runner, &mut registry, verbosity)?;
            files.push(path);
        }
    }

    output::debug(
        format!(
            "loaded {} command(s) from {} file(s)",
            registry.len(),
            files.len()
        ),
        verbosity,
    );

    Ok(Overlay { registry, files })
}

fn load_file(
    path: &Path,
    runner: &dyn Runner,
    registry: &mut CommandRegistry,
    verbosity: Verbosity,
) -> Result<(), LoadError> {
    output::debug(format!("loading {}", path.display()), verbosity);

    let text = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    runner.check(path).map_err(|e| match e {
        RunError::Syntax { message } => LoadError::Syntax {
            path: path.to_path_buf(),
            message,
        },
        other => LoadError::Run(other),
    })?;

    for def in extract(&text) {
        match registry.define(&def.function, def.help, path) {
            Registration::Replaced { name, previous } => output::debug(
                format!(
                    "{}:{}: '{}' overrides {}",
                    path.display(),
                    def.line,
                    name,
                    previous.display()
                ),
                verbosity,
            ),
            Registration::Introduced(_) | Registration::Ignored => {}
        }
    }

    Ok(())
}

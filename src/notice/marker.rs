//! notice::marker
//!
//! Storage for the "already advised" flag.
//!
//! Only existence matters; the file content is ignored. Creating a marker
//! that already exists is not an error.

use std::cell::Cell;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::RavenPaths;

/// Errors from reading or writing the marker.
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("failed to check marker '{path}': {source}")]
    Check { path: PathBuf, source: io::Error },

    #[error("failed to create marker '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("failed to write notice: {0}")]
    Write(io::Error),

    #[error("cannot locate the user configuration directory")]
    NoConfigDir,
}

/// The one-time notice flag.
pub trait NoticeMarker {
    /// Whether the notice has been shown before.
    fn has_been_notified(&self) -> Result<bool, NoticeError>;

    /// Record that the notice has been shown. Idempotent.
    fn mark_notified(&self) -> Result<(), NoticeError>;
}

/// Marker backed by an empty file.
#[derive(Debug, Clone)]
pub struct FileMarker {
    path: PathBuf,
}

impl FileMarker {
    /// Marker at the default location (`<config dir>/raven/advised`).
    ///
    /// # Errors
    ///
    /// Returns `NoticeError::NoConfigDir` if no home directory is known.
    pub fn new() -> Result<Self, NoticeError> {
        let paths = RavenPaths::from_env().ok_or(NoticeError::NoConfigDir)?;
        Ok(Self::with_path(paths.advised_marker_path()))
    }

    /// Marker at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoticeMarker for FileMarker {
    fn has_been_notified(&self) -> Result<bool, NoticeError> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(NoticeError::Check {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn mark_notified(&self) -> Result<(), NoticeError> {
        let create_error = |source| NoticeError::Create {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(create_error)?;
        }

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(create_error(e)),
        }
    }
}

/// In-memory marker.
#[derive(Debug, Default)]
pub struct MemoryMarker {
    notified: Cell<bool>,
}

impl MemoryMarker {
    /// A marker that has already been set.
    pub fn notified() -> Self {
        Self {
            notified: Cell::new(true),
        }
    }
}

impl NoticeMarker for MemoryMarker {
    fn has_been_notified(&self) -> Result<bool, NoticeError> {
        Ok(self.notified.get())
    }

    fn mark_notified(&self) -> Result<(), NoticeError> {
        self.notified.set(true);
        Ok(())
    }
}

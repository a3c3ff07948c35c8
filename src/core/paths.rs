//! core::paths
//!
//! Centralized path routing for per-user Raven storage.
//!
//! # Storage Layout
//!
//! All per-user data lives under `<config dir>/raven/`, where the config
//! dir is `$XDG_CONFIG_HOME` when set and `~/.config` otherwise:
//!
//! - `config.toml` - User configuration
//! - `advised` - Marker for the one-time PATH notice
//!
//! No code outside this module should compute `*.join("raven")` paths.
//!
//! # Example
//!
//! ```
//! use ravenfile::core::paths::RavenPaths;
//! use std::path::PathBuf;
//!
//! let paths = RavenPaths::new(PathBuf::from("/home/me/.config"));
//! assert_eq!(
//!     paths.advised_marker_path(),
//!     PathBuf::from("/home/me/.config/raven/advised")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Directory name under the user config dir.
const APP_DIR: &str = "raven";

/// Centralized path routing for per-user storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RavenPaths {
    /// The user configuration root (e.g. `~/.config`).
    pub config_root: PathBuf,
}

impl RavenPaths {
    /// Create paths rooted at an explicit config root.
    pub fn new(config_root: PathBuf) -> Self {
        Self { config_root }
    }

    /// Resolve the config root from the environment.
    ///
    /// Uses `$XDG_CONFIG_HOME` if set and non-empty, else `~/.config`.
    /// Returns `None` if neither is available.
    pub fn from_env() -> Option<Self> {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return Some(Self::new(PathBuf::from(xdg)));
        }
        dirs::home_dir().map(|home| Self::new(home.join(".config")))
    }

    /// The Raven directory under the config root.
    pub fn raven_dir(&self) -> PathBuf {
        self.config_root.join(APP_DIR)
    }

    /// Path to the user configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.raven_dir().join("config.toml")
    }

    /// Path to the one-time notice marker.
    pub fn advised_marker_path(&self) -> PathBuf {
        self.raven_dir().join("advised")
    }

    /// Get the config root as a Path reference.
    pub fn config_root(&self) -> &Path {
        &self.config_root
    }
}

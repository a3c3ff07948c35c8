//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. User config file
//! 3. Environment and CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$RAVEN_CONFIG` if set
//! 2. `<config dir>/raven/config.toml` (see [`crate::core::paths`])
//!
//! A missing file is not an error; defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use ravenfile::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Shell: {}", config.shell());
//! println!("Advise: {}", config.advise());
//! ```

pub mod schema;

pub use schema::GlobalConfig;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::RavenPaths;

/// Default shell for evaluating definitions files.
pub const DEFAULT_SHELL: &str = "bash";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// User configuration
    pub global: GlobalConfig,
    /// Path the configuration was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate(std::env::var_os("RAVEN_CONFIG"), RavenPaths::from_env()) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Pick the config file to read.
    ///
    /// An explicit override wins even if it does not exist, so a bad
    /// `$RAVEN_CONFIG` is reported instead of silently ignored.
    pub fn locate(override_path: Option<OsString>, paths: Option<RavenPaths>) -> Option<PathBuf> {
        if let Some(path) = override_path.filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        paths
            .map(|p| p.config_path())
            .filter(|path| path.exists())
    }

    /// Load and validate a specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        Ok(Self {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Configured root boundary, if any.
    pub fn root(&self) -> Option<&Path> {
        self.global.root.as_deref()
    }

    /// Shell program.
    ///
    /// Defaults to `bash` if not configured.
    pub fn shell(&self) -> &str {
        self.global.shell.as_deref().unwrap_or(DEFAULT_SHELL)
    }

    /// Whether the one-time PATH notice is enabled.
    ///
    /// Defaults to `true` if not configured.
    pub fn advise(&self) -> bool {
        self.global.advise.unwrap_or(true)
    }

    /// Get the path to the loaded config file.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.root().is_none());
        assert_eq!(config.shell(), "bash");
        assert!(config.advise());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "shell = \"zsh\"\nadvise = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.shell(), "zsh");
        assert!(!config.advise());
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "shel = \"zsh\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "root = \"relative/dir\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn missing_override_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let located = Config::locate(Some(missing.clone().into_os_string()), None).unwrap();
        assert_eq!(located, missing);
        assert!(matches!(
            Config::load_from(&located),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn locate_falls_back_to_config_dir() {
        let temp = TempDir::new().unwrap();
        let paths = RavenPaths::new(temp.path().to_path_buf());
        assert_eq!(Config::locate(None, Some(paths.clone())), None);

        fs::create_dir_all(paths.raven_dir()).unwrap();
        fs::write(paths.config_path(), "").unwrap();
        assert_eq!(
            Config::locate(Some(OsString::new()), Some(paths.clone())),
            Some(paths.config_path())
        );
    }
}

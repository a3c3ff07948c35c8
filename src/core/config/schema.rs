//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Values are validated after parsing: `root` must be absolute and `shell`
//! must be non-empty.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// root = "/home/me/work"
/// shell = "bash"
/// advise = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Root boundary directory for discovery
    pub root: Option<PathBuf>,

    /// Shell used to evaluate definitions files
    pub shell: Option<String>,

    /// Whether to show the one-time PATH notice
    pub advise: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(root) = &self.root {
            if !root.is_absolute() {
                return Err(ConfigError::InvalidValue(format!(
                    "root '{}' must be an absolute path",
                    root.display()
                )));
            }
        }

        if let Some(shell) = &self.shell {
            if shell.trim().is_empty() {
                return Err(ConfigError::InvalidValue("shell cannot be empty".into()));
            }
        }

        Ok(())
    }
}

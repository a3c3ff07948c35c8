//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`CommandName`] - Canonical lookup key for a command
//!
//! # Normalization
//!
//! A raw token is case-folded to lowercase and underscores become hyphens.
//! Two spellings that normalize identically name the same command.
//!
//! ```
//! use ravenfile::core::types::CommandName;
//!
//! let a = CommandName::new("Build_All").unwrap();
//! let b = CommandName::new("build-all").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(a.as_str(), "build-all");
//!
//! assert!(CommandName::new("").is_err());
//! assert!(CommandName::new("has space").is_err());
//! ```

use std::fmt;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid command name: {0}")]
    InvalidCommandName(String),
}

/// A normalized command name.
///
/// Construction accepts ASCII letters, digits, hyphens and underscores.
/// The stored form is lowercase with every underscore replaced by a hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandName(String);

impl CommandName {
    /// Normalize and validate a raw token.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCommandName` if the token is empty or
    /// contains characters outside the identifier set.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TypeError> {
        let raw = raw.as_ref();

        if raw.is_empty() {
            return Err(TypeError::InvalidCommandName(
                "command name cannot be empty".into(),
            ));
        }

        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(TypeError::InvalidCommandName(format!(
                "command name cannot contain '{c}'"
            )));
        }

        let normalized = raw
            .chars()
            .map(|c| match c {
                '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        Ok(Self(normalized))
    }

    /// Get the normalized name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check whether a raw identifier has the private shape.
///
/// Private names begin with an upper-case letter. They may be defined and
/// called from other definitions but are never dispatched from the CLI.
pub fn is_private(raw: &str) -> bool {
    raw.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Check whether a raw identifier is eligible for public dispatch.
///
/// The first character must not be upper-case and every character must be
/// an ASCII letter, digit or hyphen.
pub fn is_public_identifier(raw: &str) -> bool {
    !raw.is_empty()
        && !is_private(raw)
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

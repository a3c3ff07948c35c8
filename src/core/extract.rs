//! core::extract
//!
//! Static extraction of command headers and their help comments.
//!
//! # Rules
//!
//! A definition header is a line that starts at column zero and declares a
//! function whose identifier uses only letters, digits and hyphens:
//!
//! ```text
//! build() {
//! function build {
//! FUNCTION build() {
//! ```
//!
//! The contiguous run of comment lines immediately above a header becomes
//! that command's help. Adjacency is strict: a blank line or any code line
//! between the comments and the header discards the block. Each help line
//! has its leading `#` and at most one following space removed.
//!
//! # Example
//!
//! ```
//! use ravenfile::core::extract::extract;
//!
//! let defs = extract("# - compile everything\n# (slow)\nbuild() {\n  make\n}\n");
//! assert_eq!(defs.len(), 1);
//! assert_eq!(defs[0].function, "build");
//! assert_eq!(defs[0].help, vec!["- compile everything", "(slow)"]);
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// A command header found in a definitions file, with its help block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Function identifier exactly as written in the header.
    pub function: String,
    /// 1-based line number of the header.
    pub line: usize,
    /// Help lines, comment markers stripped, in file order.
    pub help: Vec<String>,
}

fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(
            r"^(?:(?i:function)\s+([A-Za-z0-9-]+)\s*(?:\(\s*\))?|([A-Za-z0-9-]+)\s*\(\s*\))\s*\{",
        )
        .expect("header pattern is valid")
    })
}

/// Match a definition header, returning the function identifier.
pub fn parse_header(line: &str) -> Option<&str> {
    let caps = header_pattern().captures(line)?;
    caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str())
}

/// Check whether a line is a comment line.
fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Remove the leading comment marker and exactly one following space.
pub fn strip_comment_marker(line: &str) -> &str {
    let body = line.trim_start();
    let body = body.strip_prefix('#').unwrap_or(body);
    body.strip_prefix(' ').unwrap_or(body)
}

/// Extract every definition header and its adjacent help block.
///
/// Definitions are returned in file order. A header with no adjacent
/// comment block yields an empty help list.
pub fn extract(text: &str) -> Vec<Definition> {
    let mut definitions = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if let Some(function) = parse_header(line) {
            definitions.push(Definition {
                function: function.to_string(),
                line: idx + 1,
                help: pending
                    .drain(..)
                    .map(|l| strip_comment_marker(l).to_string())
                    .collect(),
            });
        } else if is_comment(line) {
            pending.push(line);
        } else {
            pending.clear();
        }
    }

    definitions
}

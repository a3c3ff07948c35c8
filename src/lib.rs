//! Raven - directory-scoped commands defined in Ravenfiles
//!
//! Raven discovers shell function definitions in `Ravenfile` and
//! `Ravenfile.*` files between a root directory and the working directory,
//! merges them so deeper directories override shallower ones, extracts help
//! from the comments above each definition, and dispatches a command line
//! to the matching function.
//!
//! # Architecture
//!
//! - [`cli`] - Argument parsing and wiring (parses args, delegates to core/engine)
//! - [`core`] - Command names, help extraction, overlay loading, registry, config
//! - [`engine`] - Dispatch, the runner seam, and the built-in `init`
//! - [`notice`] - One-time PATH advice behind a marker trait
//! - [`ui`] - Output utilities
//!
//! # Invariants
//!
//! 1. The registry is complete before the first dispatch and never mutated after
//! 2. Overlay order is root first, working directory last, lexical within a directory
//! 3. A command's exit status passes through unchanged

pub mod cli;
pub mod core;
pub mod engine;
pub mod notice;
pub mod ui;

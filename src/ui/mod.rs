//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware diagnostics
//!
//! # Design
//!
//! Help listings are written by the dispatcher to caller-supplied writers.
//! Everything else a user sees on stderr goes through [`output`].

pub mod output;

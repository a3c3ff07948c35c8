//! core
//!
//! Domain types and the discovery pipeline.
//!
//! # Modules
//!
//! - [`types`] - Strong types: CommandName and identifier shapes
//! - [`extract`] - Help extraction from comments above definition headers
//! - [`overlay`] - Directory-chain discovery and root-to-leaf overlay
//! - [`registry`] - Public commands, help entries and bindings
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized per-user storage paths
//!
//! # Design Principles
//!
//! - Discovery is deterministic: same filesystem, same registry
//! - Help and binding for a command are always registered together

pub mod config;
pub mod extract;
pub mod overlay;
pub mod paths;
pub mod registry;
pub mod types;

//! Application-level utilities for the Stash CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Path resolution for config, store and keyfile
//! - Key provider selection

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{resolve_config_path, resolve_store_path};

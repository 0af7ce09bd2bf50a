//! Output formatting helpers for the CLI.
//!
//! This module provides formatting utilities for displaying records
//! as JSON or as a table / plain text.

mod json;
mod text;

// Re-export public API
pub use json::{record_detail_json, record_summary_json, records_json};
pub use text::{print_record, print_record_list};

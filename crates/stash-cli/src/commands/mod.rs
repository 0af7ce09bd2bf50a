//! Command handlers, one module per command group.

pub mod misc;
pub mod records;

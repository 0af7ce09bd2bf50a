//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// No record matches the given ID.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments (including a rejected record).
    pub const INVALID_INPUT: i32 = 4;

    /// The change is in memory only; writing the store file failed.
    pub const NOT_PERSISTED: i32 = 6;
}

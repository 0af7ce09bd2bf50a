//! Input and parsing helper functions for the CLI.

use dialoguer::Password;
use stash_core::{EncryptedStore, Record};
use uuid::Uuid;

use crate::errors::CliError;

/// Shortest accepted ID prefix.
pub const MIN_ID_PREFIX: usize = 8;

pub const LIST_HINT: &str = "Hint: Run `stash list` to see record IDs.";

/// Prompt for a password secret without echo.
pub fn prompt_secret() -> anyhow::Result<String> {
    Password::new()
        .with_prompt("Secret")
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read secret: {}", e))
}

/// Resolve a full UUID or a unique prefix to a record ID in `store`.
pub fn resolve_record_id(store: &EncryptedStore, input: &str) -> anyhow::Result<Uuid> {
    let input = input.trim();
    if let Ok(id) = Uuid::parse_str(input) {
        if store.get(&id).is_some() {
            return Ok(id);
        }
        return Err(CliError::not_found(format!("No record with ID {}", id), LIST_HINT).into());
    }

    if input.len() < MIN_ID_PREFIX {
        return Err(CliError::invalid_input(format!(
            "ID prefix \"{}\" is too short (need at least {} characters)",
            input, MIN_ID_PREFIX
        ))
        .into());
    }

    let needle = input.to_ascii_lowercase();
    let matches: Vec<Uuid> = store
        .records()
        .iter()
        .filter(|record| record.id.to_string().starts_with(&needle))
        .map(|record| record.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(CliError::not_found(format!("No record matches {}", input), LIST_HINT).into()),
        _ => Err(CliError::invalid_input(format!(
            "ID prefix \"{}\" matches {} records; use more characters",
            input,
            matches.len()
        ))
        .into()),
    }
}

/// First 8 characters of the record ID.
pub fn short_id(record: &Record) -> String {
    record.id.to_string()[..MIN_ID_PREFIX].to_string()
}

/// First non-blank line of `label`, cut to `max` characters.
///
/// A trailing ellipsis marks a cut line or further non-blank lines.
pub fn truncate_label(label: &str, max: usize) -> String {
    let mut lines = label.lines().map(str::trim).filter(|line| !line.is_empty());
    let first_line = lines.next().unwrap_or("");
    let multiline = lines.next().is_some();
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else if multiline {
        format!("{}…", first_line)
    } else {
        first_line.to_string()
    }
}

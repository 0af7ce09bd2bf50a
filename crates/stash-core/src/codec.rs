//! Serialization of the record collection.
//!
//! The plaintext inside the encrypted file is:
//!
//! ```text
//! [FORMAT_VERSION(1)][JSON {"records": [...]}]
//! ```
//!
//! Every record carries an explicit `kind` tag, so adding a variant later does
//! not change how existing files decode. Order is preserved exactly.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StashError};
use crate::record::Record;

/// Version byte written at the start of every payload.
pub const FORMAT_VERSION: u8 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    records: &'a [Record],
}

#[derive(Deserialize)]
struct Envelope {
    records: Vec<Record>,
}

/// Encode `records` (newest first) into the versioned payload.
pub fn encode(records: &[Record]) -> Result<Vec<u8>> {
    let mut out = vec![FORMAT_VERSION];
    serde_json::to_writer(&mut out, &EnvelopeRef { records })
        .map_err(|e| StashError::Persist(format!("Failed to encode records: {}", e)))?;
    Ok(out)
}

/// Decode a payload produced by [`encode`].
///
/// # Errors
///
/// Returns `StashError::Decode` for an empty payload, an unknown version
/// byte, malformed JSON, or duplicate record ids. Nothing is returned on
/// failure; there are no partial results.
pub fn decode(bytes: &[u8]) -> Result<Vec<Record>> {
    let (version, body) = bytes
        .split_first()
        .ok_or_else(|| StashError::Decode("Payload is empty".to_string()))?;
    if *version != FORMAT_VERSION {
        return Err(StashError::Decode(format!(
            "Unsupported format version {} (expected {})",
            version, FORMAT_VERSION
        )));
    }

    let envelope: Envelope = serde_json::from_slice(body)?;
    ensure_unique_ids(&envelope.records)?;
    Ok(envelope.records)
}

fn ensure_unique_ids(records: &[Record]) -> Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id) {
            return Err(StashError::Decode(format!(
                "Duplicate record id {}",
                record.id
            )));
        }
    }
    Ok(())
}

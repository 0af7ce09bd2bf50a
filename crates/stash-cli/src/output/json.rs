//! JSON output formatting for records.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use stash_core::{Record, RecordVariant};

/// Summary of a record for listings. Never includes a secret or image bytes.
pub fn record_summary_json(record: &Record) -> serde_json::Value {
    let mut value = serde_json::json!({
        "id": record.id,
        "kind": record.kind(),
        "created_at": record.created_at,
    });
    match &record.variant {
        RecordVariant::Text { content } => {
            value["content"] = serde_json::json!(content);
        }
        RecordVariant::Password { alias, .. } => {
            value["alias"] = serde_json::json!(alias);
        }
        RecordVariant::Image { bytes, alias } => {
            value["alias"] = serde_json::json!(alias);
            value["size"] = serde_json::json!(bytes.len());
        }
        RecordVariant::Link { url, alias } => {
            value["alias"] = serde_json::json!(alias);
            value["url"] = serde_json::json!(url);
        }
    }
    value
}

/// Full record for `show --json`, including the secret and base64 image bytes.
pub fn record_detail_json(record: &Record) -> serde_json::Value {
    let mut value = record_summary_json(record);
    match &record.variant {
        RecordVariant::Password { secret, .. } => {
            value["secret"] = serde_json::json!(secret);
        }
        RecordVariant::Image { bytes, .. } => {
            value["data"] = serde_json::json!(STANDARD.encode(bytes));
        }
        RecordVariant::Text { .. } | RecordVariant::Link { .. } => {}
    }
    value
}

pub fn records_json(records: &[&Record]) -> Vec<serde_json::Value> {
    records
        .iter()
        .map(|record| record_summary_json(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_omits_secret() {
        let record = Record::new(RecordVariant::password("hunter2", "mail"));
        let value = record_summary_json(&record);
        assert_eq!(value["kind"], "password");
        assert_eq!(value["alias"], "mail");
        assert!(value.get("secret").is_none());
        assert!(!value.to_string().contains("hunter2"));
    }

    #[test]
    fn test_detail_includes_secret() {
        let record = Record::new(RecordVariant::password("hunter2", "mail"));
        let value = record_detail_json(&record);
        assert_eq!(value["secret"], "hunter2");
    }

    #[test]
    fn test_image_summary_has_size_and_detail_has_data() {
        let record = Record::new(RecordVariant::image(vec![1, 2, 3], "pic"));
        let summary = record_summary_json(&record);
        assert_eq!(summary["size"], 3);
        assert!(summary.get("data").is_none());

        let detail = record_detail_json(&record);
        assert_eq!(detail["data"], "AQID");
    }
}

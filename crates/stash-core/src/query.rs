//! Search and partitioning over a collection snapshot.
//!
//! Everything here is read-only and order-preserving: results keep the
//! relative order of the input (newest first when given a store's records).

use crate::record::{Record, RecordKind, RecordVariant};

/// Records matching `query`, case-insensitively, in input order.
///
/// An empty query matches everything. Searched fields per kind:
/// text → content; password → alias or secret; image → alias; link → alias or url.
pub fn filter<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches(&record.variant, &needle))
        .collect()
}

/// Records of one kind, in input order.
///
/// Accepts a collection slice or the output of [`filter`], so the two compose.
pub fn filter_kind<'a, I>(records: I, kind: RecordKind) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| record.kind() == kind)
        .collect()
}

fn matches(variant: &RecordVariant, needle: &str) -> bool {
    match variant {
        RecordVariant::Text { content } => contains(content, needle),
        RecordVariant::Password { secret, alias } => {
            contains(alias, needle) || contains(secret, needle)
        }
        RecordVariant::Image { alias, .. } => contains(alias, needle),
        RecordVariant::Link { url, alias } => contains(alias, needle) || contains(url, needle),
    }
}

/// `needle` must already be lowercase.
fn contains(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

/// A collection split by kind, each group in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partitioned<'a> {
    pub text: Vec<&'a Record>,
    pub password: Vec<&'a Record>,
    pub image: Vec<&'a Record>,
    pub link: Vec<&'a Record>,
}

impl<'a> Partitioned<'a> {
    pub fn get(&self, kind: RecordKind) -> &[&'a Record] {
        match kind {
            RecordKind::Text => &self.text,
            RecordKind::Password => &self.password,
            RecordKind::Image => &self.image,
            RecordKind::Link => &self.link,
        }
    }
}

/// Group `records` into the four kinds without reordering within a group.
pub fn partition_by_variant(records: &[Record]) -> Partitioned<'_> {
    let mut groups = Partitioned::default();
    for record in records {
        match record.variant {
            RecordVariant::Text { .. } => groups.text.push(record),
            RecordVariant::Password { .. } => groups.password.push(record),
            RecordVariant::Image { .. } => groups.image.push(record),
            RecordVariant::Link { .. } => groups.link.push(record),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Vec<Record> {
        vec![
            Record::new(RecordVariant::text("Hello World")),
            Record::new(RecordVariant::password("Tr0ub4dor", "Email")),
            Record::new(RecordVariant::image(vec![1, 2, 3], "Screenshot hello")),
            Record::new(RecordVariant::link("https://docs.rs", "Rust docs")),
            Record::new(RecordVariant::text("another note")),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<uuid::Uuid> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let records = collection();
        let result = filter(&records, "");
        assert_eq!(ids(&result), records.iter().map(|r| r.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_case_insensitive_match() {
        let records = vec![Record::new(RecordVariant::text("Hello"))];
        assert_eq!(filter(&records, "hello").len(), 1);
        assert_eq!(filter(&records, "HELLO").len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter(&collection(), "xyz").is_empty());
    }

    #[test]
    fn test_fields_searched_per_kind() {
        let records = collection();

        // Text content and image alias, in source order.
        let hello = filter(&records, "hello");
        assert_eq!(ids(&hello), vec![records[0].id, records[2].id]);

        // Password matches on alias and on secret.
        assert_eq!(ids(&filter(&records, "email")), vec![records[1].id]);
        assert_eq!(ids(&filter(&records, "troub")), Vec::<uuid::Uuid>::new());
        assert_eq!(ids(&filter(&records, "tr0ub")), vec![records[1].id]);

        // Link matches on alias and on url.
        assert_eq!(ids(&filter(&records, "docs.rs")), vec![records[3].id]);
        assert_eq!(ids(&filter(&records, "rust")), vec![records[3].id]);
    }

    #[test]
    fn test_image_bytes_are_not_searched() {
        let records = vec![Record::new(RecordVariant::image(b"needle".to_vec(), "pic"))];
        assert!(filter(&records, "needle").is_empty());
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let records = collection();
        let groups = partition_by_variant(&records);

        assert_eq!(ids(&groups.text), vec![records[0].id, records[4].id]);
        assert_eq!(ids(&groups.password), vec![records[1].id]);
        assert_eq!(ids(&groups.image), vec![records[2].id]);
        assert_eq!(ids(&groups.link), vec![records[3].id]);
        assert_eq!(groups.get(RecordKind::Text), groups.text.as_slice());
    }

    #[test]
    fn test_filter_kind() {
        let records = collection();
        assert_eq!(
            ids(&filter_kind(&records, RecordKind::Text)),
            vec![records[0].id, records[4].id]
        );
    }

    #[test]
    fn test_filter_kind_narrows_search_result() {
        let records = collection();
        let hello = filter(&records, "hello");
        assert_eq!(
            ids(&filter_kind(hello, RecordKind::Image)),
            vec![records[2].id]
        );
    }
}

//! Text and table output formatting for records.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use stash_core::{Record, RecordVariant};

use crate::helpers::{short_id, truncate_label};

const LABEL_WIDTH: usize = 48;

/// Print records as a table, or as `<id> <kind> <label>` lines in quiet mode.
pub fn print_record_list(records: &[&Record], quiet: bool) {
    if quiet {
        for record in records {
            println!(
                "{} {} {}",
                short_id(record),
                record.kind(),
                truncate_label(record.variant.label(), LABEL_WIDTH)
            );
        }
        return;
    }

    if records.is_empty() {
        println!("No records.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Kind", "Label", "Created"]);

    for record in records {
        table.add_row(vec![
            short_id(record),
            record.kind().to_string(),
            truncate_label(record.variant.label(), LABEL_WIDTH),
            record.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    println!("{table}");
}

/// Print a single record with its payload.
pub fn print_record(record: &Record, quiet: bool) {
    if quiet {
        match &record.variant {
            RecordVariant::Text { content } => println!("{}", content),
            RecordVariant::Password { secret, .. } => println!("{}", secret),
            RecordVariant::Image { bytes, .. } => println!("{} bytes", bytes.len()),
            RecordVariant::Link { url, .. } => println!("{}", url),
        }
        return;
    }

    println!("ID:      {}", record.id);
    println!("Kind:    {}", record.kind());
    println!("Created: {}", record.created_at.to_rfc3339());
    match &record.variant {
        RecordVariant::Text { content } => {
            println!();
            println!("{}", content);
        }
        RecordVariant::Password { secret, alias } => {
            println!("Alias:   {}", alias);
            println!("Secret:  {}", secret);
        }
        RecordVariant::Image { bytes, alias } => {
            println!("Alias:   {}", alias);
            println!("Size:    {} bytes", bytes.len());
        }
        RecordVariant::Link { url, alias } => {
            println!("Alias:   {}", alias);
            println!("URL:     {}", url);
        }
    }
}

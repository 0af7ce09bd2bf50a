//! Handlers for `add`, `list`, `show` and `delete`.

use std::fs;

use stash_core::query::filter_kind;
use stash_core::{filter, EncryptedStore, Record, RecordVariant};
use tracing::debug;

use crate::app::AppContext;
use crate::cli::{AddArgs, AddKind, DeleteArgs, ListArgs, ShowArgs};
use crate::errors::CliError;
use crate::helpers::{prompt_secret, resolve_record_id, LIST_HINT};
use crate::output::{print_record, print_record_list, record_detail_json, records_json};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let variant = build_variant(&args.kind)?;
    let kind = variant.kind();

    let mut store = ctx.open_store()?;
    let record = store.add(variant).ok_or_else(|| {
        CliError::invalid_input(format!("Rejected {} record: required fields are empty", kind))
    })?;
    ensure_durable(&store)?;

    if ctx.quiet() {
        println!("{}", record.id);
    } else {
        println!("Added {} {}", kind, record.id);
    }
    Ok(())
}

fn build_variant(kind: &AddKind) -> anyhow::Result<RecordVariant> {
    let variant = match kind {
        AddKind::Text { content } => RecordVariant::text(content.as_str()),
        AddKind::Password { alias, secret } => {
            let secret = match secret {
                Some(secret) => secret.clone(),
                None => prompt_secret()?,
            };
            RecordVariant::password(secret, alias.as_str())
        }
        AddKind::Image { alias, file } => {
            let bytes = fs::read(file).map_err(|e| {
                CliError::invalid_input(format!("Failed to read {}: {}", file.display(), e))
            })?;
            debug!(file = %file.display(), size = bytes.len(), "read image");
            RecordVariant::image(bytes, alias.as_str())
        }
        AddKind::Link { alias, url } => RecordVariant::link(url.as_str(), alias.as_str()),
    };
    Ok(variant)
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let query = args.query.as_deref().unwrap_or("");
    let matched = filter(store.records(), query);
    let records: Vec<&Record> = match args.kind {
        Some(kind) => filter_kind(matched, kind),
        None => matched,
    };

    if args.json {
        let output = serde_json::to_string_pretty(&records_json(&records))?;
        println!("{}", output);
    } else {
        print_record_list(&records, ctx.quiet());
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let id = resolve_record_id(&store, &args.id)?;
    let record = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Record {} disappeared", id))?;

    if let Some(output) = &args.output {
        let RecordVariant::Image { bytes, .. } = &record.variant else {
            return Err(CliError::invalid_input(format!(
                "--output only applies to image records; {} is a {} record",
                id,
                record.kind()
            ))
            .into());
        };
        fs::write(output, bytes)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.display(), e))?;
        if !ctx.quiet() {
            println!("Wrote {} bytes to {}", bytes.len(), output.display());
        }
        return Ok(());
    }

    if args.json {
        let output = serde_json::to_string_pretty(&record_detail_json(record))?;
        println!("{}", output);
    } else {
        print_record(record, ctx.quiet());
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let mut store = ctx.open_store()?;
    let id = resolve_record_id(&store, &args.id)?;

    if !store.delete(&id) {
        return Err(CliError::not_found(format!("No record with ID {}", id), LIST_HINT).into());
    }
    ensure_durable(&store)?;

    if !ctx.quiet() {
        println!("Deleted {}", id);
    }
    Ok(())
}

fn ensure_durable(store: &EncryptedStore) -> anyhow::Result<()> {
    if store.is_durable() {
        return Ok(());
    }
    Err(CliError::not_persisted(format!(
        "Change kept in memory only; failed to write {}",
        store.path().display()
    ))
    .into())
}

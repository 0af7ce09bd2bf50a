use clap::CommandFactory;
use clap_complete::generate;
use stash_core::LoadStatus;

use crate::app::{resolve_config_path, resolve_store_path, AppContext};
use crate::cli::Cli;

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "stash", &mut std::io::stdout());
    Ok(())
}

/// Print where the config, store and key live, and how the store opened.
pub fn handle_path(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    let config_path = resolve_config_path(cli)?;
    let store_path = resolve_store_path(cli, ctx.config()?)?;

    if ctx.quiet() {
        println!("{}", store_path.display());
        return Ok(());
    }

    let config_note = if config_path.exists() {
        ""
    } else {
        " (not found, using defaults)"
    };
    println!("Config: {}{}", config_path.display(), config_note);
    println!("Store:  {}", store_path.display());
    println!("Key:    {}", ctx.key_source()?);

    let store = ctx.open_store()?;
    let status = match store.load_status() {
        LoadStatus::Fresh => "empty (no store file yet)".to_string(),
        LoadStatus::Loaded => format!("{} record(s)", store.len()),
        LoadStatus::Recovered { reason, quarantined } => match quarantined {
            Some(moved) => format!(
                "recovered empty ({}); old file moved to {}",
                reason,
                moved.display()
            ),
            None => format!(
                "recovered empty ({}); file left in place until the next write",
                reason
            ),
        },
    };
    println!("Status: {}", status);
    Ok(())
}

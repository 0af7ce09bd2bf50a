//! Stash CLI - an encrypted, device-bound stash of notes, passwords, images and links
//!
//! This is the command-line interface for Stash. It opens the encrypted store
//! through `stash-core` and maps failures to exit codes.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;

use clap::Parser;
use stash_core::VERSION;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{misc, records};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        eprintln!("Error: {}", e);
        let code = e
            .downcast_ref::<CliError>()
            .map(CliError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

/// Log to stderr so command output on stdout stays clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Add(args)) => {
            records::handle_add(ctx, args)?;
        }
        Some(Commands::List(args)) => {
            records::handle_list(ctx, args)?;
        }
        Some(Commands::Show(args)) => {
            records::handle_show(ctx, args)?;
        }
        Some(Commands::Delete(args)) => {
            records::handle_delete(ctx, args)?;
        }
        Some(Commands::Path) => {
            misc::handle_path(ctx, cli)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args.shell)?;
        }
        None => {
            println!("stash {}", VERSION);
            println!("Encrypted stash for notes, passwords, images and links.");
            println!();
            println!("Quickstart:");
            println!("  stash add text \"remember the milk\"");
            println!("  stash add password --alias email");
            println!("  stash list");
            println!("  stash show <ID>");
            println!();
            println!("Run `stash --help` for all commands.");
        }
    }
    Ok(())
}

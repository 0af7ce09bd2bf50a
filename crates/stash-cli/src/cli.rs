use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use stash_core::{RecordKind, VERSION};

/// Stash - an encrypted, device-bound stash of notes, passwords, images and links
#[derive(Parser)]
#[command(name = "stash")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "STASH_PATH")]
    pub store: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, env = "STASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter (e.g. "warn", "stash_core=debug")
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a record to the stash
    Add(AddArgs),

    /// List records, newest first
    List(ListArgs),

    /// Show one record, including its secret or image payload
    Show(ShowArgs),

    /// Delete a record
    Delete(DeleteArgs),

    /// Show where the store and key live
    Path,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    #[command(subcommand)]
    pub kind: AddKind,
}

#[derive(Subcommand)]
pub enum AddKind {
    /// Add a text snippet
    Text {
        /// Text content
        #[arg(value_name = "CONTENT")]
        content: String,
    },

    /// Add a password (prompts for the secret when --secret is omitted)
    Password {
        /// Label shown in lists
        #[arg(long)]
        alias: String,

        /// Secret value (visible in shell history; prefer the prompt)
        #[arg(long)]
        secret: Option<String>,
    },

    /// Add an image from a file
    Image {
        /// Label shown in lists
        #[arg(long)]
        alias: String,

        /// Image file to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Add a link
    Link {
        /// Label shown in lists
        #[arg(long)]
        alias: String,

        /// URL
        #[arg(value_name = "URL")]
        url: String,
    },
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Case-insensitive search text
    #[arg(short = 'f', long)]
    pub query: Option<String>,

    /// Only show one kind (text, password, image, link)
    #[arg(long)]
    pub kind: Option<RecordKind>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Record ID (full UUID or a unique prefix of at least 8 characters)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Write image bytes to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Record ID (full UUID or a unique prefix of at least 8 characters)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

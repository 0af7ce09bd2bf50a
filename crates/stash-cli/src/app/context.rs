//! Application context for the Stash CLI.
//!
//! Provides a unified context that combines CLI arguments with the
//! lazily-loaded config file.

use once_cell::unsync::OnceCell;
use tracing::debug;

use stash_core::EncryptedStore;

use crate::cli::Cli;
use crate::config::{read_config_or_default, StashConfig};

use super::resolver::{key_provider, resolve_config_path, resolve_store_path};

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<StashConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&StashConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path(self.cli)?;
            debug!(path = %path.display(), "loading config");
            read_config_or_default(&path)
        })
    }

    /// Open the store with the configured key source and retention caps.
    ///
    /// Never fails because of the store file itself; see `EncryptedStore::open`.
    pub fn open_store(&self) -> anyhow::Result<EncryptedStore> {
        let config = self.config()?;
        let path = resolve_store_path(self.cli, config)?;
        let provider = key_provider(config)?;
        let store = EncryptedStore::open_with_provider(&path, provider.as_ref())?
            .with_retention(config.retention.policy())?;
        Ok(store)
    }

    /// Human-readable description of the configured key source.
    pub fn key_source(&self) -> anyhow::Result<String> {
        Ok(key_provider(self.config()?)?.describe())
    }
}

//! Path and key-source resolution.

use std::path::PathBuf;

use stash_core::keys::{KeyProvider, KeychainProvider, KeyfileProvider, DEFAULT_KEY_ACCOUNT};

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_keyfile_path, default_store_path, KeySource, StashConfig,
};

/// Resolve the config file path: `--config` / `STASH_CONFIG`, then the XDG default.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => default_config_path(),
    }
}

/// Resolve the store file path: `--store` / `STASH_PATH`, then config, then the XDG default.
pub fn resolve_store_path(cli: &Cli, config: &StashConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = &cli.store {
        return Ok(path.clone());
    }
    match &config.store.path {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_store_path(),
    }
}

/// Build the key provider selected by the config.
pub fn key_provider(config: &StashConfig) -> anyhow::Result<Box<dyn KeyProvider>> {
    match config.key.source {
        KeySource::Keychain => {
            let provider = match &config.key.service {
                Some(service) => KeychainProvider::new(service.clone(), DEFAULT_KEY_ACCOUNT),
                None => KeychainProvider::default(),
            };
            Ok(Box::new(provider))
        }
        KeySource::Keyfile => {
            let path = match &config.key.path {
                Some(path) => PathBuf::from(path),
                None => default_keyfile_path()?,
            };
            Ok(Box::new(KeyfileProvider::new(path)))
        }
    }
}

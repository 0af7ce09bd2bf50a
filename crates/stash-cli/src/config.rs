use std::path::{Path, PathBuf};

use serde::Deserialize;
use stash_core::RetentionPolicy;

use crate::errors::CliError;

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Default, Deserialize)]
pub struct StashConfig {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub key: KeySection,
    #[serde(default)]
    pub retention: RetentionSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreSection {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KeySection {
    #[serde(default)]
    pub source: KeySource,
    /// Keyfile location when `source = "keyfile"`
    pub path: Option<String>,
    /// Keychain service name when `source = "keychain"`
    pub service: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RetentionSection {
    #[serde(default = "default_max_images")]
    pub max_images: usize,
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    #[default]
    Keychain,
    Keyfile,
}

impl Default for RetentionSection {
    fn default() -> Self {
        let policy = RetentionPolicy::default();
        Self {
            max_images: policy.max_images,
            max_records: policy.max_records,
        }
    }
}

impl RetentionSection {
    pub fn policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_images: self.max_images,
            max_records: self.max_records,
        }
    }
}

fn default_max_images() -> usize {
    RetentionPolicy::default().max_images
}

fn default_max_records() -> usize {
    RetentionPolicy::default().max_records
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("stash.bin"))
}

pub fn default_keyfile_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("stash.key"))
}

/// Read the config file, or defaults if it does not exist.
pub fn read_config_or_default(path: &Path) -> anyhow::Result<StashConfig> {
    if !path.exists() {
        return Ok(StashConfig::default());
    }
    read_config(path)
}

/// Read and check the config file. Out-of-range values are invalid input.
pub fn read_config(path: &Path) -> anyhow::Result<StashConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    let config: StashConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
    config.retention.policy().validate().map_err(|e| {
        CliError::invalid_input(format!("Invalid config {}: {}", path.display(), e))
    })?;
    Ok(config)
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("stash"));
        }
    }
    Ok(home_dir()?.join(".config").join("stash"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("stash"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("stash"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

//! Configuration loading for mediashelf.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::storage::DOCUMENT_FILE_NAME;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MEDIASHELF_CONFIG";

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Where the collection document is read from and exported to.
#[derive(Debug, Deserialize)]
pub struct CollectionConfig {
    /// File path or http(s) URL of the document.
    #[serde(default = "default_document_path")]
    pub source: String,
    /// Default output of `export`.
    #[serde(default = "default_document_path")]
    pub export: String,
}

/// Settings for HTTP sources.
#[derive(Debug, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_document_path() -> String {
    DOCUMENT_FILE_NAME.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            source: default_document_path(),
            export: default_document_path(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load config from `$MEDIASHELF_CONFIG` or
    /// ~/.config/mediashelf/config.toml, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Parse a specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "mediashelf").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Expand ~ to the user's home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}

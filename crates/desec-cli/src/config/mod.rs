//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional defaults read from `config.toml`. Flags and environment
/// variables take precedence over every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Zone apex to manage.
    pub domain: Option<String>,

    /// deSEC API base URL.
    pub api_base: Option<String>,

    /// Directory holding the record documents.
    pub records_dir: Option<PathBuf>,

    /// Whether to enable DNSSEC before applying records.
    pub dnssec: Option<bool>,

    /// Client-side request pacing; 0 or absent means unlimited.
    pub rate_limit_per_second: Option<u32>,
}

impl Config {
    /// Get the default config file path, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("me", "is-dev", "desec-apply")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location, if present.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }
}

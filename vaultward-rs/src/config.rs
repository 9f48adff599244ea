//! Vaultward configuration (`config.toml`).

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "VAULTWARD_CONFIG";

/// Extra path filter rules, appended after the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Additional ignore globs (`**`, `*`, `?`).
    #[serde(default)]
    pub ignored_patterns: Vec<String>,
    /// Additional allowed file extensions, with or without the leading dot.
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default vault used when `--vault` is not given.
    #[serde(default)]
    pub vault: Option<PathBuf>,

    #[serde(default)]
    pub filter: FilterConfig,
}

impl Config {
    /// Load the config from `$VAULTWARD_CONFIG` or the user config directory.
    ///
    /// A missing file is not an error and yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse a TOML config document.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Where the config file is expected to live.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        dirs::config_dir().map(|dir| dir.join("vaultward").join("config.toml"))
    }

    /// Pick the vault root: CLI override, then config, then the working directory.
    pub fn resolve_vault_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Some(ref path) = self.vault {
            return Ok(path.clone());
        }
        std::env::current_dir().map_err(|e| {
            VaultError::ConfigError(format!("failed to get current directory: {}", e))
        })
    }
}

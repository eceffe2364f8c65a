//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::ExportFormat;
use crate::host::DEFAULT_JOPLIN_URL;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default export format
    pub format: Option<ExportFormat>,

    /// Default export root directory
    pub path: Option<PathBuf>,

    /// Copy attachments into `assets/`
    pub include_resources: Option<bool>,

    /// One block per paragraph
    pub split_by_paragraph: Option<bool>,

    /// REST host settings
    pub joplin: JoplinConfig,
}

/// The `[joplin]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JoplinConfig {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/logseq-export/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("logseq-export")
            .join("config.toml")
    }

    /// Resolve the export format: CLI, then config, then JSON.
    pub fn format(&self, cli_format: Option<ExportFormat>) -> ExportFormat {
        cli_format.or(self.format).unwrap_or_default()
    }

    /// Resolve the export root. There is no default destination.
    pub fn export_path(&self, cli_path: Option<&PathBuf>) -> Option<PathBuf> {
        cli_path.cloned().or_else(|| self.path.clone())
    }

    /// Resolve `include_resources`, defaulting to true.
    pub fn include_resources(&self, cli_flag: Option<bool>) -> bool {
        cli_flag.or(self.include_resources).unwrap_or(true)
    }

    /// Resolve `split_by_paragraph`, defaulting to true.
    pub fn split_by_paragraph(&self, cli_flag: Option<bool>) -> bool {
        cli_flag.or(self.split_by_paragraph).unwrap_or(true)
    }

    /// Resolve the REST host URL.
    pub fn joplin_url(&self, cli_url: Option<&str>) -> String {
        cli_url
            .map(str::to_string)
            .or_else(|| self.joplin.url.clone())
            .unwrap_or_else(|| DEFAULT_JOPLIN_URL.to_string())
    }

    /// Resolve the REST host token.
    pub fn joplin_token(&self, cli_token: Option<&str>) -> Option<String> {
        cli_token
            .map(str::to_string)
            .or_else(|| self.joplin.token.clone())
    }
}

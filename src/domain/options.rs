//! Export options consumed by the exporter.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Target interchange format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One pretty-printed JSON page per note
    #[default]
    Json,
    /// One EDN page per note
    Edn,
    /// A single OPML outline of the whole folder tree
    Opml,
}

impl ExportFormat {
    /// File extension for per-note page files.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Edn => "edn",
            ExportFormat::Opml => "opml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown export format '{0}' (expected json, edn or opml)")]
pub struct ParseFormatError(String);

impl FromStr for ExportFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "edn" => Ok(ExportFormat::Edn),
            "opml" => Ok(ExportFormat::Opml),
            _ => Err(ParseFormatError(s.to_string())),
        }
    }
}

/// Options record for a single export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Export root directory.
    pub path: PathBuf,
    /// Copy attachments into `assets/` and rewrite their references.
    pub include_resources: bool,
    /// One block per paragraph instead of one block per note.
    pub split_by_paragraph: bool,
}

impl ExportOptions {
    /// Directory holding one page file per note.
    pub fn pages_dir(&self) -> PathBuf {
        self.path.join("pages")
    }

    /// Directory holding materialized resources.
    pub fn assets_dir(&self) -> PathBuf {
        self.path.join("assets")
    }
}

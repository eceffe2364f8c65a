//! Records as returned by the host's data API.
//!
//! All records are read-only snapshots taken when the graph is loaded.
//! Unknown fields in host payloads are ignored; missing optional fields
//! fall back to their defaults.

use serde::{Deserialize, Serialize};

/// Parent identifier used by the host for top-level folders and notes.
pub const ROOT_PARENT_ID: &str = "";

/// A note owned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Creation time, epoch milliseconds.
    #[serde(default)]
    pub created_time: i64,
    /// Last update time, epoch milliseconds.
    #[serde(default)]
    pub updated_time: i64,
}

/// A folder (notebook). Folders form a tree via `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Many-to-many association between a note and a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteTag {
    pub note_id: String,
    pub tag_id: String,
}

/// A binary attachment referenced from note bodies by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub file_extension: String,
}

impl Resource {
    /// File extension used when the resource is written to disk.
    ///
    /// Falls back to `bin` when the host reports no extension.
    pub fn extension(&self) -> &str {
        let ext = self.file_extension.trim().trim_start_matches('.');
        if ext.is_empty() { "bin" } else { ext }
    }

    /// File name of the materialized copy: `<id>.<extension>`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, self.extension())
    }
}

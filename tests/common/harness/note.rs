//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use logseq_export::domain::Note;
use uuid::Uuid;

/// Builder for creating host notes with sensible defaults.
///
/// Generates a 32-hex-digit ID like the host does, with a fluent API for
/// setting optional fields.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: String,
    parent_id: String,
    title: String,
    body: String,
    created_time: i64,
    updated_time: i64,
    tags: Vec<String>,
}

impl TestNote {
    /// Creates a new root-level test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            parent_id: String::new(),
            title: title.into(),
            body: String::new(),
            created_time: 0,
            updated_time: 0,
            tags: Vec::new(),
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Places the note in a folder.
    pub fn parent(mut self, folder_id: impl Into<String>) -> Self {
        self.parent_id = folder_id.into();
        self
    }

    /// Sets the body content (builder method).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets both timestamps, in milliseconds since the epoch.
    pub fn times(mut self, created: i64, updated: i64) -> Self {
        self.created_time = created;
        self.updated_time = updated;
        self
    }

    /// Attaches a tag by title.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn get_tags(&self) -> &[String] {
        &self.tags
    }

    /// A link to this note in the host's markdown form.
    pub fn link(&self, text: &str) -> String {
        format!("[{text}](:/{})", self.id)
    }

    /// Converts to a host note record.
    pub fn to_note(&self) -> Note {
        Note {
            id: self.id.clone(),
            parent_id: self.parent_id.clone(),
            title: self.title.clone(),
            body: self.body.clone(),
            created_time: self.created_time,
            updated_time: self.updated_time,
        }
    }
}

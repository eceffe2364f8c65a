//! Intermediate representation of one exported note.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One unit of body content within a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Synthetic identifier, unique per export run.
    pub id: String,
    pub content: String,
}

impl Block {
    /// Creates a block with a freshly generated identifier.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
        }
    }
}

/// Page properties, serialized in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageProperties {
    pub id: String,
    /// ISO-8601 creation time.
    pub created: String,
    /// ISO-8601 update time.
    pub updated: String,
    /// Tag titles; omitted when the note has none.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A note converted for the target tool: title, properties, ordered blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub properties: PageProperties,
    pub blocks: Vec<Block>,
}

//! JSON page encoding.

use crate::domain::Page;

/// Encodes a page as pretty-printed JSON (two-space indentation).
pub fn page_to_json(page: &Page) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(page)
}

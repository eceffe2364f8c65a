//! Reference rewriting for note exports.
//!
//! Note bodies address other entities with an internal `:/<id>` scheme:
//!
//! - embedded resources: `![alt](:/0123abcd)`
//! - links to notes: `[text](:/0123abcd)`
//!
//! Resources are rewritten to a relative asset path, note links to the
//! target tool's `[[Title]]` backlink syntax. References that cannot be
//! resolved are left byte-for-byte unchanged. Neither pass produces text
//! that the same pass would match again.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::domain::Note;

/// `![alt](:/id)`; alt text may be empty.
static RESOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(:/([a-f0-9]+)\)").expect("resource reference pattern is valid")
});

/// `[text](:/id)`; the optional leading `!` is captured so image
/// references can be skipped.
static NOTE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[([^\]]+)\]\(:/([a-f0-9]+)\)").expect("note link pattern is valid")
});

/// Result of rewriting references in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// The content with resolved references.
    pub content: String,
    /// Number of references rewritten.
    pub resolved: usize,
    /// Number of references left unchanged because the target is unknown.
    pub unresolved: usize,
}

/// Returns the distinct resource identifiers referenced by `content`, in
/// order of first appearance.
pub fn resource_references(content: &str) -> Vec<&str> {
    let mut ids: Vec<&str> = Vec::new();
    for caps in RESOURCE_RE.captures_iter(content) {
        if let Some(id) = caps.get(2).map(|m| m.as_str())
            && !ids.contains(&id)
        {
            ids.push(id);
        }
    }
    ids
}

/// Rewrites resource references against a table of materialized paths.
///
/// `paths` maps resource identifier to the relative path of its copy.
/// References whose identifier is absent are left untouched.
pub fn rewrite_resources(content: &str, paths: &HashMap<String, String>) -> Rewrite {
    let resolved = Cell::new(0usize);
    let unresolved = Cell::new(0usize);

    let result = RESOURCE_RE.replace_all(content, |caps: &Captures| {
        let alt = &caps[1];
        let id = &caps[2];

        match paths.get(id) {
            Some(path) => {
                resolved.set(resolved.get() + 1);
                format!("![{alt}]({path})")
            }
            None => {
                unresolved.set(unresolved.get() + 1);
                warn!(resource_id = id, "resource reference left unrewritten");
                caps[0].to_string()
            }
        }
    });

    Rewrite {
        content: result.into_owned(),
        resolved: resolved.get(),
        unresolved: unresolved.get(),
    }
}

/// Resolves internal note links to `[[Title]]` backlinks.
#[derive(Debug, Clone, Default)]
pub struct LinkResolver {
    /// Note identifier to note title.
    titles: HashMap<String, String>,
}

impl LinkResolver {
    /// Creates a resolver over every note in the export.
    pub fn from_notes(notes: &[Note]) -> Self {
        let titles = notes
            .iter()
            .map(|note| (note.id.clone(), note.title.clone()))
            .collect();
        Self { titles }
    }

    /// Rewrites note links in `content`. The original link text is dropped.
    pub fn resolve(&self, content: &str) -> Rewrite {
        let resolved = Cell::new(0usize);
        let unresolved = Cell::new(0usize);

        let result = NOTE_LINK_RE.replace_all(content, |caps: &Captures| {
            if !caps[1].is_empty() {
                return caps[0].to_string();
            }
            let id = &caps[3];

            match self.titles.get(id) {
                Some(title) if NOTE_LINK_RE.is_match(title) => {
                    unresolved.set(unresolved.get() + 1);
                    debug!(note_id = id, "note title contains a link; left unrewritten");
                    caps[0].to_string()
                }
                Some(title) => {
                    resolved.set(resolved.get() + 1);
                    format!("[[{title}]]")
                }
                None => {
                    unresolved.set(unresolved.get() + 1);
                    debug!(note_id = id, "note link target not found");
                    caps[0].to_string()
                }
            }
        });

        Rewrite {
            content: result.into_owned(),
            resolved: resolved.get(),
            unresolved: unresolved.get(),
        }
    }
}

//! OPML outline of the whole folder tree.
//!
//! Unlike JSON and EDN, OPML keeps the folder hierarchy: every folder is an
//! outline element wrapping its sub-folders and notes, and every note is a
//! leaf carrying its full rewritten body in `_note`. Resources must already
//! be materialized; rendering itself performs no I/O.

use std::collections::HashMap;
use std::fmt::Write as _;

use super::links::{LinkResolver, rewrite_resources};
use super::loader::NoteGraph;
use crate::domain::{Note, ROOT_PARENT_ID};
use crate::infra::iso_timestamp;

/// File name of the outline, written at the export root.
pub const OPML_FILE_NAME: &str = "joplin-export.opml";

const INDENT: &str = "  ";

/// A rendered outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpmlDocument {
    pub xml: String,
    /// Notes reachable from the root and emitted as leaves.
    pub notes_written: usize,
}

/// Renders the folder/note hierarchy as OPML.
pub struct OpmlRenderer<'a> {
    graph: &'a NoteGraph,
    links: &'a LinkResolver,
    /// Materialized resource paths; `None` leaves resource references as is.
    resource_paths: Option<&'a HashMap<String, String>>,
}

impl<'a> OpmlRenderer<'a> {
    pub fn new(
        graph: &'a NoteGraph,
        links: &'a LinkResolver,
        resource_paths: Option<&'a HashMap<String, String>>,
    ) -> Self {
        Self {
            graph,
            links,
            resource_paths,
        }
    }

    /// Renders the complete document.
    pub fn render(&self) -> OpmlDocument {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <opml version=\"2.0\">\n\
             \x20 <head>\n\
             \x20   <title>Joplin Export</title>\n\
             \x20 </head>\n\
             \x20 <body>\n",
        );
        let mut notes_written = 0;
        self.write_level(&mut xml, ROOT_PARENT_ID, 2, &mut notes_written);
        xml.push_str("  </body>\n</opml>\n");

        OpmlDocument { xml, notes_written }
    }

    /// Folders first, then notes, both in host order.
    fn write_level(&self, xml: &mut String, parent_id: &str, depth: usize, written: &mut usize) {
        let indent = INDENT.repeat(depth);

        for folder in self.graph.child_folders(parent_id) {
            let _ = writeln!(xml, "{indent}<outline text=\"{}\">", escape_xml(&folder.title));
            self.write_level(xml, &folder.id, depth + 1, written);
            let _ = writeln!(xml, "{indent}</outline>");
        }

        for note in self.graph.child_notes(parent_id) {
            xml.push_str(&indent);
            self.write_note(xml, note);
            xml.push('\n');
            *written += 1;
        }
    }

    fn write_note(&self, xml: &mut String, note: &Note) {
        let _ = write!(xml, "<outline text=\"{}\"", escape_xml(&note.title));

        let tags = self.graph.tags_for(&note.id);
        if !tags.is_empty() {
            let _ = write!(xml, " _tags=\"{}\"", escape_xml(&tags.join(",")));
        }

        let _ = write!(
            xml,
            " _created=\"{}\" _updated=\"{}\" _note=\"{}\"/>",
            iso_timestamp(note.created_time),
            iso_timestamp(note.updated_time),
            escape_xml(&self.note_body(note)),
        );
    }

    /// Both rewrite passes over the whole body.
    fn note_body(&self, note: &Note) -> String {
        let body = match self.resource_paths {
            Some(paths) => rewrite_resources(&note.body, paths).content,
            None => note.body.clone(),
        };
        self.links.resolve(&body).content
    }
}

/// Escapes `& < > " '` for use in XML attribute values.
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

//! Converting one note into a [`Page`].
//!
//! Used by the JSON and EDN serializers. OPML does not go through pages:
//! it keeps the folder hierarchy and writes whole note bodies.

use std::collections::HashMap;

use tracing::debug;

use super::assets::AssetMaterializer;
use super::blocks::segment;
use super::links::{LinkResolver, resource_references, rewrite_resources};
use crate::domain::{Note, Page, PageProperties};
use crate::host::DataApi;
use crate::infra::iso_timestamp;

/// Builds pages for every note of one export run.
pub struct PageBuilder<'a> {
    tags_by_note: &'a HashMap<String, Vec<String>>,
    links: &'a LinkResolver,
    include_resources: bool,
    split_by_paragraph: bool,
}

impl<'a> PageBuilder<'a> {
    pub fn new(
        tags_by_note: &'a HashMap<String, Vec<String>>,
        links: &'a LinkResolver,
        include_resources: bool,
        split_by_paragraph: bool,
    ) -> Self {
        Self {
            tags_by_note,
            links,
            include_resources,
            split_by_paragraph,
        }
    }

    /// Builds the page for `note`.
    ///
    /// Order matters: resource references are rewritten on the whole body
    /// before segmentation, note links afterwards on each block alone. A
    /// link split across two blocks is left as is.
    pub async fn build<A: DataApi>(
        &self,
        note: &Note,
        materializer: &mut AssetMaterializer<'_, A>,
    ) -> Page {
        let properties = PageProperties {
            id: note.id.clone(),
            created: iso_timestamp(note.created_time),
            updated: iso_timestamp(note.updated_time),
            tags: self.tags_by_note.get(&note.id).cloned().unwrap_or_default(),
        };

        let body = if self.include_resources {
            let ids = resource_references(&note.body);
            let table = materializer.materialize_all(ids).await;
            rewrite_resources(&note.body, &table).content
        } else {
            note.body.clone()
        };

        let mut blocks = segment(&body, self.split_by_paragraph);
        let mut resolved = 0;
        for block in &mut blocks {
            let rewrite = self.links.resolve(&block.content);
            resolved += rewrite.resolved;
            block.content = rewrite.content;
        }

        debug!(
            note_id = %note.id,
            blocks = blocks.len(),
            links = resolved,
            "page built"
        );

        Page {
            title: note.title.clone(),
            properties,
            blocks,
        }
    }
}

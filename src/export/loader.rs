//! Loading the complete note graph from the host.

use std::collections::{HashMap, HashSet};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Folder, Note, NoteTag, Resource, Tag};
use crate::host::{Collection, DataApi, HostError, PageRequest};

/// Items requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Pages requested per collection before giving up on a host that never
/// reports the last page.
pub const MAX_PAGES: u32 = 10_000;

/// A collection could not be retrieved. Fatal to the export.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to retrieve {collection}: {source}")]
    Host {
        collection: Collection,
        #[source]
        source: HostError,
    },

    #[error("failed to decode {collection}: {message}")]
    Decode {
        collection: Collection,
        message: String,
    },

    #[error("{collection} still reported more items after {limit} pages")]
    PageLimitExceeded { collection: Collection, limit: u32 },
}

impl RetrievalError {
    /// The collection that failed.
    pub fn collection(&self) -> Collection {
        match self {
            RetrievalError::Host { collection, .. }
            | RetrievalError::Decode { collection, .. }
            | RetrievalError::PageLimitExceeded { collection, .. } => *collection,
        }
    }
}

/// Immutable snapshot of everything the host holds, with lookup indexes.
///
/// Collections keep the host's native order; indexes refer back into them.
#[derive(Debug, Clone, Default)]
pub struct NoteGraph {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    pub tags: Vec<Tag>,
    pub resources: Vec<Resource>,
    resource_index: HashMap<String, usize>,
    tags_by_note: HashMap<String, Vec<String>>,
    folders_by_parent: HashMap<String, Vec<usize>>,
    notes_by_parent: HashMap<String, Vec<usize>>,
}

impl NoteGraph {
    /// Builds the graph and its indexes.
    ///
    /// Associations naming an unknown note or tag are dropped.
    pub fn new(
        notes: Vec<Note>,
        folders: Vec<Folder>,
        tags: Vec<Tag>,
        note_tags: Vec<NoteTag>,
        resources: Vec<Resource>,
    ) -> Self {
        let tag_titles: HashMap<&str, &str> = tags
            .iter()
            .map(|t| (t.id.as_str(), t.title.as_str()))
            .collect();

        let mut notes_by_parent: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, note) in notes.iter().enumerate() {
            notes_by_parent
                .entry(note.parent_id.clone())
                .or_default()
                .push(i);
        }

        let note_ids: HashSet<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        let mut tags_by_note: HashMap<String, Vec<String>> = HashMap::new();
        let mut dropped = 0usize;
        for assoc in &note_tags {
            let note_known = note_ids.contains(assoc.note_id.as_str());
            match tag_titles.get(assoc.tag_id.as_str()) {
                Some(title) if note_known => tags_by_note
                    .entry(assoc.note_id.clone())
                    .or_default()
                    .push((*title).to_string()),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(dropped, "dropped unresolved note-tag associations");
        }

        let mut folders_by_parent: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, folder) in folders.iter().enumerate() {
            folders_by_parent
                .entry(folder.parent_id.clone())
                .or_default()
                .push(i);
        }

        let resource_index = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();

        Self {
            notes,
            folders,
            tags,
            resources,
            resource_index,
            tags_by_note,
            folders_by_parent,
            notes_by_parent,
        }
    }

    /// Looks up a resource by identifier.
    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resource_index.get(id).map(|&i| &self.resources[i])
    }

    /// Tag titles attached to a note, in association order.
    pub fn tags_for(&self, note_id: &str) -> &[String] {
        self.tags_by_note
            .get(note_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Note identifier to tag titles, for every tagged note.
    pub fn tags_by_note(&self) -> &HashMap<String, Vec<String>> {
        &self.tags_by_note
    }

    /// Folders whose parent is `parent_id`, in host order.
    pub fn child_folders<'a>(&'a self, parent_id: &str) -> impl Iterator<Item = &'a Folder> + 'a {
        self.folders_by_parent
            .get(parent_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.folders[i])
    }

    /// Notes whose parent is `parent_id`, in host order.
    pub fn child_notes<'a>(&'a self, parent_id: &str) -> impl Iterator<Item = &'a Note> + 'a {
        self.notes_by_parent
            .get(parent_id)
            .into_iter()
            .flatten()
            .map(|&i| &self.notes[i])
    }
}

/// Paginates over every host collection.
pub struct GraphLoader<'a, A> {
    api: &'a A,
    page_size: usize,
    max_pages: u32,
}

impl<'a, A: DataApi> GraphLoader<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: MAX_PAGES,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Retrieves every collection concurrently and assembles the graph.
    ///
    /// # Errors
    ///
    /// Returns the first `RetrievalError`; no partial graph is produced.
    pub async fn load(&self) -> Result<NoteGraph, RetrievalError> {
        let (notes, folders, tags, note_tags, resources) = tokio::try_join!(
            self.fetch_all::<Note>(Collection::Notes),
            self.fetch_all::<Folder>(Collection::Folders),
            self.fetch_all::<Tag>(Collection::Tags),
            self.fetch_all::<NoteTag>(Collection::NoteTags),
            self.fetch_all::<Resource>(Collection::Resources),
        )?;

        Ok(NoteGraph::new(notes, folders, tags, note_tags, resources))
    }

    /// Requests pages 1, 2, .. of `collection` until the host reports no
    /// more items.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, RetrievalError> {
        let mut items = Vec::new();

        for page in 1..=self.max_pages {
            let request = PageRequest {
                page,
                limit: self.page_size,
                fields: collection.fields(),
            };
            let batch = self
                .api
                .get_page(collection, &request)
                .await
                .map_err(|source| RetrievalError::Host { collection, source })?;

            for value in batch.items {
                let item = serde_json::from_value(value).map_err(|e| RetrievalError::Decode {
                    collection,
                    message: e.to_string(),
                })?;
                items.push(item);
            }

            if !batch.has_more {
                debug!(%collection, pages = page, items = items.len(), "collection loaded");
                return Ok(items);
            }
        }

        Err(RetrievalError::PageLimitExceeded {
            collection,
            limit: self.max_pages,
        })
    }
}

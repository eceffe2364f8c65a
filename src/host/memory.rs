//! In-memory host, optionally loaded from a snapshot directory.
//!
//! Snapshot layout:
//!
//! ```text
//! snapshot/
//!   notes.json  folders.json  tags.json  note_tags.json  resources.json
//!   resources/<id>  or  resources/<id>.<ext>
//! ```
//!
//! Each JSON file holds an array of records. Missing files are empty
//! collections.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Collection, DataApi, HostError, ItemPage, PageRequest};
use crate::domain::{Folder, Note, NoteTag, Resource, Tag};

/// A host whose data lives in memory.
///
/// Pagination follows the host contract: page `n` of size `limit` holds
/// items `(n-1)*limit ..  n*limit`, and `has_more` is set while items
/// remain. Request counters make fetch behaviour observable.
#[derive(Debug, Default)]
pub struct MemoryHost {
    notes: Vec<Note>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    note_tags: Vec<NoteTag>,
    resources: Vec<Resource>,
    files: HashMap<String, Vec<u8>>,
    failing: HashSet<Collection>,
    failing_files: HashSet<String>,
    page_requests: RefCell<HashMap<Collection, u32>>,
    file_fetches: RefCell<HashMap<String, usize>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Io` if a present file cannot be read and
    /// `HostError::Decode` if a collection file is not a JSON array of
    /// records.
    pub fn from_dir(dir: &Path) -> Result<Self, HostError> {
        if !dir.is_dir() {
            return Err(HostError::Unavailable(format!(
                "snapshot directory not found: {}",
                dir.display()
            )));
        }

        let mut host = Self {
            notes: read_collection(dir, Collection::Notes)?,
            folders: read_collection(dir, Collection::Folders)?,
            tags: read_collection(dir, Collection::Tags)?,
            note_tags: read_collection(dir, Collection::NoteTags)?,
            resources: read_collection(dir, Collection::Resources)?,
            ..Self::default()
        };

        let files_dir = dir.join("resources");
        if files_dir.is_dir() {
            for entry in std::fs::read_dir(&files_dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let id = id.to_string();
                host.files.insert(id, std::fs::read(&path)?);
            }
        }

        Ok(host)
    }

    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_folder(mut self, folder: Folder) -> Self {
        self.folders.push(folder);
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_note_tag(mut self, note_id: &str, tag_id: &str) -> Self {
        self.note_tags.push(NoteTag {
            note_id: note_id.to_string(),
            tag_id: tag_id.to_string(),
        });
        self
    }

    /// Adds a resource record and, if given, its binary payload.
    pub fn with_resource(mut self, resource: Resource, payload: Option<&[u8]>) -> Self {
        if let Some(bytes) = payload {
            self.files.insert(resource.id.clone(), bytes.to_vec());
        }
        self.resources.push(resource);
        self
    }

    /// Makes every page request for `collection` fail.
    pub fn failing(mut self, collection: Collection) -> Self {
        self.failing.insert(collection);
        self
    }

    /// Makes payload fetches for resource `id` fail.
    pub fn failing_file(mut self, id: &str) -> Self {
        self.failing_files.insert(id.to_string());
        self
    }

    /// Number of page requests issued for `collection`.
    pub fn page_requests(&self, collection: Collection) -> u32 {
        self.page_requests
            .borrow()
            .get(&collection)
            .copied()
            .unwrap_or(0)
    }

    /// Number of payload fetches issued for resource `id`.
    pub fn file_fetches(&self, id: &str) -> usize {
        self.file_fetches.borrow().get(id).copied().unwrap_or(0)
    }

    fn page_of<T: Serialize>(
        items: &[T],
        request: &PageRequest<'_>,
    ) -> Result<ItemPage<serde_json::Value>, HostError> {
        let limit = request.limit.max(1);
        let start = (request.page.max(1) as usize - 1).saturating_mul(limit);
        let end = start.saturating_add(limit).min(items.len());
        let slice = items.get(start..end).unwrap_or(&[]);

        let page_items = slice
            .iter()
            .map(|item| serde_json::to_value(item).map_err(|e| HostError::Decode(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ItemPage {
            items: page_items,
            has_more: end < items.len(),
        })
    }
}

fn read_collection<T: DeserializeOwned>(
    dir: &Path,
    collection: Collection,
) -> Result<Vec<T>, HostError> {
    let path = dir.join(format!("{}.json", collection.name()));
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(&path)?;
    serde_json::from_str(&contents)
        .map_err(|e| HostError::Decode(format!("{}: {}", path.display(), e)))
}

impl DataApi for MemoryHost {
    async fn get_page(
        &self,
        collection: Collection,
        request: &PageRequest<'_>,
    ) -> Result<ItemPage<serde_json::Value>, HostError> {
        *self
            .page_requests
            .borrow_mut()
            .entry(collection)
            .or_insert(0) += 1;

        if self.failing.contains(&collection) {
            return Err(HostError::Unavailable(format!(
                "{collection} is unavailable"
            )));
        }

        match collection {
            Collection::Notes => Self::page_of(&self.notes, request),
            Collection::Folders => Self::page_of(&self.folders, request),
            Collection::Tags => Self::page_of(&self.tags, request),
            Collection::NoteTags => Self::page_of(&self.note_tags, request),
            Collection::Resources => Self::page_of(&self.resources, request),
        }
    }

    async fn get_resource_file(&self, id: &str) -> Result<Option<Vec<u8>>, HostError> {
        *self
            .file_fetches
            .borrow_mut()
            .entry(id.to_string())
            .or_insert(0) += 1;

        if self.failing_files.contains(id) {
            return Err(HostError::Unavailable(format!(
                "payload for resource {id} is unavailable"
            )));
        }
        Ok(self.files.get(id).cloned())
    }
}

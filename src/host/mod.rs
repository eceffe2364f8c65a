//! Boundary to the host note application.
//!
//! The exporter never reaches the host through ambient state. Everything it
//! needs is passed in as a [`DataApi`] (paginated reads and resource
//! payloads) and a [`Notifier`] (the completion message).

mod memory;
mod rest;

use std::fmt;
use std::future::Future;
use std::io;

use serde::Deserialize;
use thiserror::Error;

pub use memory::MemoryHost;
pub use rest::{DEFAULT_JOPLIN_URL, JoplinClient};

/// A host collection the exporter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Notes,
    Folders,
    Tags,
    NoteTags,
    Resources,
}

impl Collection {
    /// Every collection, in load order.
    pub const ALL: [Collection; 5] = [
        Collection::Notes,
        Collection::Folders,
        Collection::Tags,
        Collection::NoteTags,
        Collection::Resources,
    ];

    /// Name used in host paths, snapshot files and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Notes => "notes",
            Collection::Folders => "folders",
            Collection::Tags => "tags",
            Collection::NoteTags => "note_tags",
            Collection::Resources => "resources",
        }
    }

    /// Field selection requested from the host.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Collection::Notes => &[
                "id",
                "parent_id",
                "title",
                "body",
                "created_time",
                "updated_time",
            ],
            Collection::Folders => &["id", "title", "parent_id"],
            Collection::Tags => &["id", "title"],
            Collection::NoteTags => &["note_id", "tag_id"],
            Collection::Resources => &["id", "title", "mime", "file_extension"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One page request. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest<'a> {
    pub page: u32,
    pub limit: usize,
    pub fields: &'a [&'a str],
}

/// One page of results as returned by the host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemPage<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Errors raised by a host implementation.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("host returned status {status} for {path}")]
    Status { status: u16, path: String },

    #[error("invalid host response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Unavailable(String),
}

/// Read access to the host's data store.
pub trait DataApi {
    /// Fetches one page of a collection.
    fn get_page(
        &self,
        collection: Collection,
        request: &PageRequest<'_>,
    ) -> impl Future<Output = Result<ItemPage<serde_json::Value>, HostError>>;

    /// Fetches a resource's binary payload. `Ok(None)` means the host has
    /// no payload for that identifier.
    fn get_resource_file(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, HostError>>;
}

/// The host's message-box primitive.
pub trait Notifier {
    fn show_message(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn show_message(&self, message: &str) {
        (**self).show_message(message);
    }
}

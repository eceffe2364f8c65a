//! Converting the host's notes into pages for the target tool.
//!
//! Supports JSON and EDN (one page file per note) and OPML (one outline
//! of the whole folder tree). Attachments are copied into `assets/` and
//! internal references rewritten on the way.

mod assets;
mod blocks;
pub mod edn;
mod exporter;
mod json;
pub mod links;
mod loader;
pub mod opml;
mod page;

pub use assets::{AssetMaterializer, ResourceError};
pub use blocks::segment;
pub use edn::page_to_edn;
pub use exporter::{ExportError, ExportReport, Exporter};
pub use json::page_to_json;
pub use links::{LinkResolver, Rewrite, resource_references, rewrite_resources};
pub use loader::{DEFAULT_PAGE_SIZE, GraphLoader, MAX_PAGES, NoteGraph, RetrievalError};
pub use opml::{OPML_FILE_NAME, OpmlDocument, OpmlRenderer, escape_xml};
pub use page::PageBuilder;

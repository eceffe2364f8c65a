//! Core types: source records from the host, export options, and the
//! intermediate Page/Block representation.

mod options;
mod page;
mod records;

pub use options::{ExportFormat, ExportOptions, ParseFormatError};
pub use page::{Block, Page, PageProperties};
pub use records::{Folder, Note, NoteTag, Resource, ROOT_PARENT_ID, Tag};

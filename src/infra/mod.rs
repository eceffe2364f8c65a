//! File output, file naming, timestamps

mod filename;
mod fs;
mod time;

pub use filename::{page_file_name, sanitize_file_name};
pub use fs::{FsError, ensure_dir, write_atomic};
pub use time::iso_timestamp;

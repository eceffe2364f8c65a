//! File output for exports: idempotent directory creation and atomic writes.

use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors during file system operations on export output.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parent directory does not exist: {path}")]
    ParentNotFound { path: PathBuf },

    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl FsError {
    /// Creates an appropriate FsError from an io::Error.
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }
}

/// Creates `dir` and all missing parents. Succeeds if it already exists.
///
/// # Errors
///
/// Returns `FsError::NotADirectory` if `dir` exists but is a file.
pub fn ensure_dir(dir: &Path) -> Result<(), FsError> {
    if dir.exists() && !dir.is_dir() {
        return Err(FsError::NotADirectory { path: dir.into() });
    }
    std::fs::create_dir_all(dir).map_err(|e| FsError::from_io(dir, e))
}

/// Writes `contents` to `path` via a temp file in the same directory.
///
/// Readers never observe a partially written file. An existing file at
/// `path` is replaced.
///
/// # Errors
///
/// Returns `FsError::ParentNotFound` if the parent directory is missing.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let parent = path
        .parent()
        .ok_or_else(|| FsError::ParentNotFound { path: path.into() })?;

    if !parent.exists() {
        return Err(FsError::ParentNotFound {
            path: parent.into(),
        });
    }

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(path, e))?;

    temp.write_all(contents)
        .map_err(|e| FsError::from_io(path, e))?;

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

//! Copying resources into the export's assets directory.

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use super::loader::NoteGraph;
use crate::host::DataApi;
use crate::infra::{ensure_dir, write_atomic};

/// A single resource could not be materialized. Recoverable: references to
/// it stay unrewritten.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error("resource {id} is not in the resource collection")]
    NotInCollection { id: String },

    #[error("failed to fetch resource {id}: {message}")]
    Fetch { id: String, message: String },

    #[error("host returned no payload for resource {id}")]
    NoPayload { id: String },

    #[error("failed to write resource {id}: {message}")]
    Write { id: String, message: String },
}

/// Copies each referenced resource to `<assets_dir>/<id>.<ext>` at most once
/// per run and remembers the outcome.
pub struct AssetMaterializer<'a, A> {
    api: &'a A,
    graph: &'a NoteGraph,
    assets_dir: PathBuf,
    /// Prefix for rewritten references, relative to the referencing file.
    link_prefix: String,
    copied: HashMap<String, String>,
    failed: HashMap<String, ResourceError>,
}

impl<'a, A: DataApi> AssetMaterializer<'a, A> {
    /// Creates a materializer writing to `assets_dir`. References point at
    /// `<link_prefix>/<file name>`.
    pub fn new(
        api: &'a A,
        graph: &'a NoteGraph,
        assets_dir: impl Into<PathBuf>,
        link_prefix: impl Into<String>,
    ) -> Self {
        Self {
            api,
            graph,
            assets_dir: assets_dir.into(),
            link_prefix: link_prefix.into().trim_end_matches('/').to_string(),
            copied: HashMap::new(),
            failed: HashMap::new(),
        }
    }

    /// Returns the relative path of the resource's copy, fetching and
    /// writing it on first use.
    ///
    /// # Errors
    ///
    /// Returns a `ResourceError` if the resource is unknown, its payload
    /// cannot be fetched, or the copy cannot be written. The failure is
    /// remembered and returned again without another fetch.
    pub async fn materialize(&mut self, id: &str) -> Result<String, ResourceError> {
        if let Some(path) = self.copied.get(id) {
            return Ok(path.clone());
        }
        if let Some(err) = self.failed.get(id) {
            return Err(err.clone());
        }

        match self.copy(id).await {
            Ok(path) => {
                debug!(resource_id = id, path = %path, "resource materialized");
                self.copied.insert(id.to_string(), path.clone());
                Ok(path)
            }
            Err(err) => {
                warn!(resource_id = id, error = %err, "resource not materialized");
                self.failed.insert(id.to_string(), err.clone());
                Err(err)
            }
        }
    }

    /// Materializes each identifier and returns the table of those that
    /// succeeded, ready for reference rewriting.
    pub async fn materialize_all<'i>(
        &mut self,
        ids: impl IntoIterator<Item = &'i str>,
    ) -> HashMap<String, String> {
        let mut table = HashMap::new();
        for id in ids {
            if let Ok(path) = self.materialize(id).await {
                table.insert(id.to_string(), path);
            }
        }
        table
    }

    /// Every resource copied so far, keyed by identifier.
    pub fn copied(&self) -> &HashMap<String, String> {
        &self.copied
    }

    /// Number of distinct resources that could not be materialized.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    async fn copy(&self, id: &str) -> Result<String, ResourceError> {
        let resource = self
            .graph
            .resource(id)
            .ok_or_else(|| ResourceError::NotInCollection { id: id.to_string() })?;

        let payload = self
            .api
            .get_resource_file(id)
            .await
            .map_err(|e| ResourceError::Fetch {
                id: id.to_string(),
                message: e.to_string(),
            })?
            .ok_or_else(|| ResourceError::NoPayload { id: id.to_string() })?;

        let write_err = |message: String| ResourceError::Write {
            id: id.to_string(),
            message,
        };
        ensure_dir(&self.assets_dir).map_err(|e| write_err(e.to_string()))?;

        let file_name = resource.file_name();
        write_atomic(&self.assets_dir.join(&file_name), &payload)
            .map_err(|e| write_err(e.to_string()))?;

        Ok(format!("{}/{}", self.link_prefix, file_name))
    }
}

//! Running a complete export: load, validate, prepare directories,
//! serialize, report.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::assets::AssetMaterializer;
use super::edn::page_to_edn;
use super::json::page_to_json;
use super::links::{LinkResolver, resource_references};
use super::loader::{DEFAULT_PAGE_SIZE, GraphLoader, NoteGraph, RetrievalError};
use super::opml::{OPML_FILE_NAME, OpmlRenderer};
use super::page::PageBuilder;
use crate::domain::{ExportFormat, ExportOptions, Note, Page};
use crate::host::{DataApi, Notifier};
use crate::infra::{FsError, ensure_dir, page_file_name, write_atomic};

/// Fatal export failures. Nothing after the failing step runs.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error("no notes to export")]
    NoNotes,

    #[error("cannot create output directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },
}

/// A single note could not be written. The note is skipped.
#[derive(Debug, Error)]
enum PageError {
    #[error("encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Write(#[from] FsError),
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub format: ExportFormat,
    /// Export root directory.
    pub path: String,
    pub notes_exported: usize,
    pub notes_skipped: usize,
    pub resources_copied: usize,
    pub resources_failed: usize,
    /// The host returned no folders; the export is flat.
    pub folders_empty: bool,
}

impl ExportReport {
    /// The completion message shown to the user.
    pub fn message(&self) -> String {
        let mut message = format!(
            "Export completed successfully! Exported {} notes ({} skipped).",
            self.notes_exported, self.notes_skipped
        );
        if self.resources_failed > 0 {
            message.push_str(&format!(
                " {} resources could not be copied.",
                self.resources_failed
            ));
        }
        message
    }
}

/// Runs exports against an injected host.
pub struct Exporter<'a, A, N> {
    api: &'a A,
    notifier: N,
    page_size: usize,
}

impl<'a, A: DataApi, N: Notifier> Exporter<'a, A, N> {
    pub fn new(api: &'a A, notifier: N) -> Self {
        Self {
            api,
            notifier,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Items requested per host page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Runs one export and shows exactly one completion message.
    ///
    /// # Errors
    ///
    /// Returns an `ExportError` for fatal failures: a collection could not
    /// be retrieved, there are no notes, or the output could not be
    /// created. Per-resource and per-note failures are counted in the
    /// report instead.
    pub async fn export(&self, options: &ExportOptions) -> Result<ExportReport, ExportError> {
        match self.run(options).await {
            Ok(report) => {
                info!(
                    format = %report.format,
                    exported = report.notes_exported,
                    skipped = report.notes_skipped,
                    resources = report.resources_copied,
                    "export finished"
                );
                self.notifier.show_message(&report.message());
                Ok(report)
            }
            Err(err) => {
                error!(error = %err, "export failed");
                self.notifier
                    .show_message(&format!("Export failed: {err}"));
                Err(err)
            }
        }
    }

    async fn run(&self, options: &ExportOptions) -> Result<ExportReport, ExportError> {
        let graph = GraphLoader::new(self.api)
            .with_page_size(self.page_size)
            .load()
            .await?;

        if graph.notes.is_empty() {
            return Err(ExportError::NoNotes);
        }
        let folders_empty = graph.folders.is_empty();
        if folders_empty {
            warn!("host returned no folders; exporting a flat outline");
        }

        create_dir(&options.path)?;
        create_dir(&options.pages_dir())?;
        if options.include_resources {
            create_dir(&options.assets_dir())?;
        }

        let mut report = ExportReport {
            format: options.format,
            path: options.path.display().to_string(),
            notes_exported: 0,
            notes_skipped: 0,
            resources_copied: 0,
            resources_failed: 0,
            folders_empty,
        };

        match options.format {
            ExportFormat::Json | ExportFormat::Edn => {
                self.export_pages(&graph, options, &mut report).await;
            }
            ExportFormat::Opml => self.export_opml(&graph, options, &mut report).await?,
        }

        Ok(report)
    }

    /// One page file per note. A failing note is logged and skipped.
    async fn export_pages(
        &self,
        graph: &NoteGraph,
        options: &ExportOptions,
        report: &mut ExportReport,
    ) {
        let links = LinkResolver::from_notes(&graph.notes);
        let builder = PageBuilder::new(
            graph.tags_by_note(),
            &links,
            options.include_resources,
            options.split_by_paragraph,
        );
        let mut materializer =
            AssetMaterializer::new(self.api, graph, options.assets_dir(), "../assets");
        let pages_dir = options.pages_dir();
        let mut written = HashSet::new();

        for note in &graph.notes {
            let page = builder.build(note, &mut materializer).await;
            let file_name = page_file_name(&note.title, options.format.extension());

            match write_page(&pages_dir, &file_name, options.format, &page) {
                Ok(()) => {
                    if !written.insert(file_name.clone()) {
                        debug!(note_id = %note.id, file = %file_name, "page file overwritten");
                    }
                    report.notes_exported += 1;
                }
                Err(err) => {
                    warn!(note_id = %note.id, error = %err, "note skipped");
                    report.notes_skipped += 1;
                }
            }
        }

        report.resources_copied = materializer.copied().len();
        report.resources_failed = materializer.failed_count();
    }

    /// A single outline at the export root. Resources are materialized for
    /// every note before the hierarchy is rendered.
    async fn export_opml(
        &self,
        graph: &NoteGraph,
        options: &ExportOptions,
        report: &mut ExportReport,
    ) -> Result<(), ExportError> {
        let mut materializer =
            AssetMaterializer::new(self.api, graph, options.assets_dir(), "assets");
        if options.include_resources {
            for note in &graph.notes {
                materializer
                    .materialize_all(resource_references(&note.body))
                    .await;
            }
        }

        let links = LinkResolver::from_notes(&graph.notes);
        let paths = options.include_resources.then(|| materializer.copied());
        let document = OpmlRenderer::new(graph, &links, paths).render();

        let path = options.path.join(OPML_FILE_NAME);
        write_atomic(&path, document.xml.as_bytes())
            .map_err(|source| ExportError::Write { path, source })?;

        report.notes_exported = document.notes_written;
        report.notes_skipped = graph.notes.len().saturating_sub(document.notes_written);
        if report.notes_skipped > 0 {
            let orphans: Vec<&str> = unreachable_notes(graph).map(|n| n.id.as_str()).collect();
            warn!(?orphans, "notes outside the folder tree were not exported");
        }
        report.resources_copied = materializer.copied().len();
        report.resources_failed = materializer.failed_count();
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    ensure_dir(path).map_err(|source| ExportError::Directory {
        path: path.to_path_buf(),
        source,
    })
}

fn write_page(
    pages_dir: &Path,
    file_name: &str,
    format: ExportFormat,
    page: &Page,
) -> Result<(), PageError> {
    let encoded = match format {
        ExportFormat::Edn => page_to_edn(page),
        ExportFormat::Json | ExportFormat::Opml => page_to_json(page)?,
    };
    write_atomic(&pages_dir.join(file_name), encoded.as_bytes())?;
    Ok(())
}

/// Notes whose parent folder chain does not reach the root.
fn unreachable_notes(graph: &NoteGraph) -> impl Iterator<Item = &Note> {
    let mut reachable: HashSet<&str> = HashSet::new();
    let mut pending = vec![""];
    while let Some(parent) = pending.pop() {
        if !reachable.insert(parent) {
            continue;
        }
        pending.extend(graph.child_folders(parent).map(|f| f.id.as_str()));
    }
    graph
        .notes
        .iter()
        .filter(move |n| !reachable.contains(n.parent_id.as_str()))
}

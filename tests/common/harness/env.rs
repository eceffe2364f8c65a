//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{ExportCommand, TestNote};
use logseq_export::domain::{Folder, Note, NoteTag, Resource, Tag};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a snapshot directory and an export root.
///
/// Records are collected in memory and written to the snapshot when a
/// command is built. Everything is removed when the `TestEnv` is dropped.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    temp_dir: TempDir,
    notes: Vec<Note>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    note_tags: Vec<NoteTag>,
    resources: Vec<Resource>,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            notes: Vec::new(),
            folders: Vec::new(),
            tags: Vec::new(),
            note_tags: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Directory holding the snapshot JSON files.
    pub fn snapshot_dir(&self) -> PathBuf {
        self.temp_dir.path().join("snapshot")
    }

    /// Export root used by `cmd()`.
    pub fn out_dir(&self) -> PathBuf {
        self.temp_dir.path().join("graph")
    }

    /// Config file path passed to every command. Absent unless written.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Adds a note and any tags it names.
    pub fn add_note(&mut self, test_note: &TestNote) -> &mut Self {
        for title in test_note.get_tags() {
            let tag_id = format!("tag-{title}");
            if !self.tags.iter().any(|t| t.id == tag_id) {
                self.tags.push(Tag {
                    id: tag_id.clone(),
                    title: title.clone(),
                });
            }
            self.note_tags.push(NoteTag {
                note_id: test_note.get_id().to_string(),
                tag_id,
            });
        }
        self.notes.push(test_note.to_note());
        self
    }

    pub fn add_folder(&mut self, id: &str, parent_id: &str, title: &str) -> &mut Self {
        self.folders.push(Folder {
            id: id.to_string(),
            parent_id: parent_id.to_string(),
            title: title.to_string(),
        });
        self
    }

    /// Adds a resource record and, if given, its payload file.
    pub fn add_resource(&mut self, id: &str, extension: &str, payload: Option<&[u8]>) -> &mut Self {
        self.resources.push(Resource {
            id: id.to_string(),
            title: format!("{id}.{extension}"),
            mime: String::new(),
            file_extension: extension.to_string(),
        });
        if let Some(bytes) = payload {
            let dir = self.snapshot_dir().join("resources");
            std::fs::create_dir_all(&dir).expect("Failed to create resources dir");
            std::fs::write(dir.join(format!("{id}.{extension}")), bytes)
                .expect("Failed to write resource payload");
        }
        self
    }

    /// Writes every collection file into the snapshot directory.
    pub fn write_snapshot(&self) -> PathBuf {
        let dir = self.snapshot_dir();
        std::fs::create_dir_all(&dir).expect("Failed to create snapshot dir");
        write_json(&dir.join("notes.json"), &self.notes);
        write_json(&dir.join("folders.json"), &self.folders);
        write_json(&dir.join("tags.json"), &self.tags);
        write_json(&dir.join("note_tags.json"), &self.note_tags);
        write_json(&dir.join("resources.json"), &self.resources);
        dir
    }

    /// Writes the config file used by `cmd()`.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// An `export` command reading this snapshot, without an output path.
    pub fn bare_cmd(&self) -> ExportCommand {
        let snapshot = self.write_snapshot();
        ExportCommand::new()
            .config(&self.config_path())
            .export()
            .snapshot(&snapshot)
    }

    /// An `export` command reading this snapshot into `out_dir()`.
    pub fn cmd(&self) -> ExportCommand {
        self.bare_cmd().output(&self.out_dir())
    }

    /// Reads a file below the export root.
    pub fn read_output(&self, relative: &str) -> String {
        let path = self.out_dir().join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Parses a JSON page below `pages/`.
    pub fn read_json_page(&self, file_name: &str) -> serde_json::Value {
        let content = self.read_output(&format!("pages/{file_name}"));
        serde_json::from_str(&content).expect("Page was not valid JSON")
    }

    /// Whether a file or directory exists below the export root.
    pub fn output_exists(&self, relative: &str) -> bool {
        self.out_dir().join(relative).exists()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn write_json<T: Serialize>(path: &Path, items: &[T]) {
    let content = serde_json::to_string_pretty(items).expect("Failed to encode snapshot");
    std::fs::write(path, content).expect("Failed to write snapshot file");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.write_snapshot()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_writes_all_collections() {
        let mut env = TestEnv::new();
        env.add_note(&TestNote::new("A").tag("work"));

        let dir = env.write_snapshot();

        for name in ["notes", "folders", "tags", "note_tags", "resources"] {
            assert!(dir.join(format!("{name}.json")).exists(), "{name}.json missing");
        }
        let tags = std::fs::read_to_string(dir.join("tags.json")).unwrap();
        assert!(tags.contains("\"work\""));
    }
}

//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several test files
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `logseq-export` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ExportCommand {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl ExportCommand {
    /// Creates a new command for the `logseq-export` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the child process.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd =
            Command::cargo_bin("logseq-export").expect("Failed to find logseq-export binary");
        cmd.env_remove("JOPLIN_TOKEN")
            .env_remove("RUST_LOG")
            .env_remove("LOGSEQ_EXPORT_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Sets the global `--config` option.
    pub fn config(self, path: &Path) -> Self {
        let path = path.to_string_lossy();
        self.args(["--config", &*path])
    }

    /// Configures for the `export` command.
    pub fn export(self) -> Self {
        self.args(["export"])
    }

    /// Sets `--snapshot`.
    pub fn snapshot(self, path: &Path) -> Self {
        let path = path.to_string_lossy();
        self.args(["--snapshot", &*path])
    }

    /// Sets `--output`.
    pub fn output(self, path: &Path) -> Self {
        let path = path.to_string_lossy();
        self.args(["--output", &*path])
    }

    /// Sets the export format.
    pub fn format(self, format: &str) -> Self {
        self.args(["--format", format])
    }

    // ===========================================
    // Output Options
    // ===========================================

    /// Adds `--output-format json` to the command.
    pub fn output_format_json(self) -> Self {
        self.args(["--output-format", "json"])
    }
}

impl Default for ExportCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        ExportCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = ExportCommand::new().export().format("edn").output_format_json();
        let args = cmd.get_args();
        assert_eq!(args[0], "export");
        assert!(args.contains(&"edn".to_string()));
        assert!(args.contains(&"--output-format".to_string()));
    }
}

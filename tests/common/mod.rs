//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::mpsc::Receiver;

use gcp_shortcuts::session::FailureReport;
use gcp_shortcuts::{ChannelReporter, SearchSession, SearchSource};
use tempfile::TempDir;

pub const PROJECTS_FILE: &str = ".raycast-gcp-shortcuts";

/// Builder for a fake home directory holding the saved project list
pub struct HomeBuilder {
    temp_dir: TempDir,
}

impl HomeBuilder {
    /// Create a home directory with no project file
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn projects_file(&self) -> PathBuf {
        self.temp_dir.path().join(PROJECTS_FILE)
    }

    /// Write the project file verbatim
    pub fn with_projects_content(self, content: impl AsRef<[u8]>) -> Self {
        fs::write(self.projects_file(), content).expect("Failed to write project file");
        self
    }

    /// Write one project ID per line
    pub fn with_projects(self, ids: &[&str]) -> Self {
        let content = ids.join("\n");
        self.with_projects_content(content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for HomeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The binary with HOME pointed at `home`
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gcp-shortcuts"));
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

/// Session whose failures are collected on the returned receiver
pub fn session_for(source: Arc<dyn SearchSource>) -> (SearchSession, Receiver<FailureReport>) {
    let (reporter, failures) = ChannelReporter::new();
    let session = SearchSession::new(source, Arc::new(reporter), Arc::new(|| {}));
    (session, failures)
}

//! Common test utilities and fixtures
//!
//! Every command runs against a throwaway home and data directory so tests
//! never see the developer's real configuration.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Isolated environment for one test
pub struct Sandbox {
    pub root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.path().join("data")
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// An `agentcamp` command with a clean environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("agentcamp").unwrap();
        cmd.current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join(".config"))
            .env("AGENTCAMP_DATA_DIR", self.data_dir())
            .env_remove("AGENTCAMP_CONFIG")
            .env_remove("AGENTCAMP_PROVIDER")
            .env_remove("AGENTCAMP_LOG_LEVEL")
            .env_remove("AGENTCAMP_LOG_FILE")
            .env_remove("AGENTCAMP_OPENAI_API_KEY")
            .env_remove("AGENTCAMP_CLAUDE_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("ANTHROPIC_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Read one of the stored JSON documents
    pub fn document(&self, file_name: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.data_dir().join(file_name)).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

//! Common test utilities for cc-sdd integration tests

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A project directory the installer runs in
pub struct TestWorkspace {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    #[allow(dead_code)]
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Whether the project holds anything at all
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        std::fs::read_dir(&self.path)
            .expect("Failed to read workspace")
            .next()
            .is_none()
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Templates bundled with the crate
pub fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// The cc-sdd binary running in `workspace`, pinned to the bundled templates
#[allow(deprecated)]
pub fn cc_sdd_cmd(workspace: &TestWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("cc-sdd").unwrap();
    cmd.current_dir(&workspace.path);
    cmd.env("CC_SDD_TEMPLATES_DIR", templates_dir());
    cmd.env_remove("CC_SDD_LOG");
    cmd
}

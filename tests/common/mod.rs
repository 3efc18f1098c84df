//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary directory for test projects and provides
/// utilities for setting up test scenarios.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Run the forgeplan binary in this project directory
    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_forgeplan"));
        cmd.current_dir(self.path());
        for arg in args {
            cmd.arg(arg);
        }
        cmd.output().expect("Failed to execute forgeplan")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined stdout of a run, lossily decoded
#[allow(dead_code)]
pub fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Combined stderr of a run, lossily decoded
#[allow(dead_code)]
pub fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Sample manifest TOML for testing
#[allow(dead_code)]
pub const SAMPLE_MANIFEST: &str = r#"
[project]
name = "Game"

[repos]
code = "github.com/example/game.git"
sdks = "github.com/example/game-sdks.git"
branch = "main"

[build]
config = "Release"
jobs = 4
targets = ["win_x86", "win_x64", "linux_x64_gcc", "linux_x64_clang"]
"#;

//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Writing logs, reports and config files
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{NewmanLog, NewmanReportFixture};

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use newman_gate_testing::{NewmanLog, TestWorld};
///
/// let world = TestWorld::new()
///     .with_log("newman.log", &NewmanLog::new("Users API").failing("Get User", "Status code is 200"));
///
/// let result = world.run(&["check", "newman.log"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            env_vars: HashMap::new(),
        }
    }

    /// Working directory the CLI runs in (the temp directory root).
    pub fn cwd(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Resolve a path relative to the working directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.cwd().join(name)
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write an arbitrary file (parent directories are created).
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        self
    }

    /// Render a synthetic Newman log to `name`.
    pub fn with_log(self, name: &str, log: &NewmanLog) -> Self {
        let text = log.render();
        self.with_file(name, &text)
    }

    /// Render a synthetic Newman JSON report to `name`.
    pub fn with_report(self, name: &str, report: &NewmanReportFixture) -> Self {
        let text = report.render();
        self.with_file(name, &text)
    }

    /// Write `newman-gate.toml` into the working directory.
    pub fn with_config(self, toml: &str) -> Self {
        self.with_file("newman-gate.toml", toml)
    }

    /// Read a file written by the CLI (e.g. a GitHub output file).
    pub fn read(&self, name: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.path(name))?)
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// `GITHUB_OUTPUT` is cleared so a CI runner's own output file is never
    /// touched; tests opt back in through `with_env`.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.cwd());
        cmd.env_remove("GITHUB_OUTPUT");
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built and the `CARGO_BIN_EXE_` environment variable to be set (which
    /// cargo test does automatically).
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("newman-gate")
            .map_err(|e| anyhow::anyhow!("Failed to find newman-gate binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Process exit code (`None` when killed by a signal).
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

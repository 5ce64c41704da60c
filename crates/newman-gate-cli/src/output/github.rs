//! GitHub Actions step outputs (`$GITHUB_OUTPUT` file format).

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Where step outputs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Appended to, never truncated.
    File(PathBuf),
}

impl OutputTarget {
    /// Explicit path, else `$GITHUB_OUTPUT`, else `None`.
    pub fn from_flag_or_env(flag: Option<PathBuf>) -> Option<Self> {
        flag.or_else(|| std::env::var_os(GITHUB_OUTPUT_ENV).map(PathBuf::from))
            .map(OutputTarget::File)
    }
}

/// Ordered collection of step outputs.
#[derive(Debug, Clone, Default)]
pub struct GithubOutput {
    entries: Vec<(String, String)>,
}

impl GithubOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        self.entries.push((key.to_string(), value.to_string()));
        self
    }

    /// Render in the `key=value` / `key<<DELIM` format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            if value.contains('\n') || value.contains('\r') {
                let delimiter = heredoc_delimiter(value);
                let _ = writeln!(out, "{}<<{}", key, delimiter);
                let _ = writeln!(out, "{}", value);
                let _ = writeln!(out, "{}", delimiter);
            } else {
                let _ = writeln!(out, "{}={}", key, value);
            }
        }
        out
    }

    pub fn write_to(&self, target: &OutputTarget) -> Result<()> {
        let rendered = self.render();
        match target {
            OutputTarget::Stdout => {
                print!("{}", rendered);
                std::io::stdout().flush()?;
            }
            OutputTarget::File(path) => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("Failed to open output file {}", path.display()))?;
                file.write_all(rendered.as_bytes())?;
                tracing::debug!(path = %path.display(), keys = self.entries.len(), "wrote step outputs");
            }
        }
        Ok(())
    }
}

/// `EOF`, or `EOF_<n>` when the value itself contains a line equal to it.
fn heredoc_delimiter(value: &str) -> String {
    let collides = |delim: &str| value.lines().any(|line| line.trim_end() == delim);

    if !collides("EOF") {
        return "EOF".to_string();
    }
    (1..)
        .map(|n| format!("EOF_{}", n))
        .find(|d| !collides(d))
        .unwrap_or_else(|| "EOF_END".to_string())
}

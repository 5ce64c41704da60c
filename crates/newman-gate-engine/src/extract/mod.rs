//! Pattern-based failure extraction from Newman CLI output.
//!
//! Newman prints one numbered block per failed assertion at the end of a run:
//!
//! ```text
//!  1.  AssertionError  Status code is 200
//!                      expected response to have status code 200 but got 404
//!                      at assertion:0 in test-script
//!                      inside "Users / Get User"
//! ```
//!
//! The text is split on the failure marker. Each occurrence opens a block that
//! runs until the next occurrence, so a block can never borrow a request name
//! from a later failure.

mod patterns;

pub use patterns::{MARKER_PLACEHOLDER, PatternChain};

use crate::Result;
use newman_gate_types::{DEFAULT_MARKER, FailureRecord, truncate_chars};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_WINDOW: usize = 30;
pub const DEFAULT_NAME_MAX_CHARS: usize = 200;

static NUMBERED_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.\s*$").expect("static pattern"));

/// Tunable knobs for [`FailureExtractor`].
///
/// The upstream log layout is a versioned contract owned by Newman, so the
/// marker, the scan window and every pattern list are configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub marker: String,
    /// Lines scanned from the marker line when looking for the request name.
    pub window: usize,
    pub name_max_chars: usize,
    /// Ordered patterns locating the enclosing request name (capture group 1).
    pub context_patterns: Vec<String>,
    /// Ordered fallback patterns locating the assertion text (capture group 1).
    pub assertion_patterns: Vec<String>,
    /// Case-insensitive matches that make a failure status-related.
    pub status_patterns: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            window: DEFAULT_WINDOW,
            name_max_chars: DEFAULT_NAME_MAX_CHARS,
            context_patterns: vec![
                r#"^\s*inside\s+"(.*?)"?\s*$"#.to_string(),
                r"^\s*inside\s+'(.*?)'?\s*$".to_string(),
            ],
            assertion_patterns: vec![
                r"^{marker}:?\s+(.+)$".to_string(),
                r"^\s*\d+\.\s+(.+)$".to_string(),
            ],
            status_patterns: vec![
                r"(?i)status\s*code".to_string(),
                r"(?i)response\s*code".to_string(),
            ],
        }
    }
}

/// Turns raw log text into an ordered sequence of [`FailureRecord`]s.
///
/// Compiled once from an [`ExtractorConfig`]; holds no state between calls.
#[derive(Debug, Clone)]
pub struct FailureExtractor {
    marker: String,
    window: usize,
    name_max_chars: usize,
    context: PatternChain,
    assertion: PatternChain,
    status: PatternChain,
}

impl Default for FailureExtractor {
    fn default() -> Self {
        // Default patterns are literals covered by tests.
        Self::new(&ExtractorConfig::default()).expect("default extractor patterns compile")
    }
}

impl FailureExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        if config.marker.is_empty() {
            return Err(newman_gate_types::Error::ConfigurationInvalid(
                "failure marker must not be empty".to_string(),
            )
            .into());
        }

        Ok(Self {
            marker: config.marker.clone(),
            window: config.window,
            name_max_chars: config.name_max_chars,
            context: PatternChain::compile(&config.context_patterns, &config.marker)?,
            assertion: PatternChain::compile(&config.assertion_patterns, &config.marker)?,
            status: PatternChain::compile(&config.status_patterns, &config.marker)?,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Extract every failure in `text`, in log order. Never fails.
    pub fn extract(&self, text: &str) -> Vec<FailureRecord> {
        let starts: Vec<usize> = text.match_indices(&self.marker).map(|(i, _)| i).collect();

        let records: Vec<FailureRecord> = starts
            .iter()
            .enumerate()
            .map(|(n, &start)| {
                let end = starts.get(n + 1).copied().unwrap_or(text.len());
                let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
                self.extract_block(&text[line_start..start], &text[start..end])
            })
            .collect();

        debug!(
            marker = %self.marker,
            failures = records.len(),
            "extracted failure blocks"
        );
        records
    }

    /// Whether an assertion description names the HTTP status/response code.
    pub fn is_status_related(&self, assertion: &str) -> bool {
        self.status.is_match(assertion)
    }

    /// Apply the configured length cap to a request name.
    pub fn cap_name(&self, name: &str) -> String {
        truncate_chars(name, self.name_max_chars).to_string()
    }

    fn extract_block(&self, line_prefix: &str, block: &str) -> FailureRecord {
        let assertion_text = self.resolve_assertion(line_prefix, block);
        let request_name = self.resolve_request(block);

        if request_name.is_none() {
            debug!(
                assertion = assertion_text.as_deref().unwrap_or(""),
                window = self.window,
                "no enclosing request found for failure block"
            );
        }

        let status_related = assertion_text
            .as_deref()
            .is_some_and(|text| self.is_status_related(text));

        FailureRecord {
            error_kind: self.marker.clone(),
            request_name,
            assertion_text,
            status_related,
        }
    }

    fn resolve_assertion(&self, line_prefix: &str, block: &str) -> Option<String> {
        let first_line = block.lines().next().unwrap_or("");

        if NUMBERED_PREFIX.is_match(line_prefix) {
            let rest = first_line
                .get(self.marker.len()..)
                .unwrap_or("")
                .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
                .trim_end();
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }

        block.lines().find_map(|line| self.assertion.capture(line))
    }

    fn resolve_request(&self, block: &str) -> Option<String> {
        block
            .lines()
            .take(self.window)
            .find_map(|line| self.context.capture(line))
            .map(|name| self.cap_name(&name))
    }
}

//! Failure count as printed by Newman's own run summary.

use regex::Regex;
use std::sync::LazyLock;

static FAILURES_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)failures:\s*(\d+)").unwrap());

// │              assertions │        6 │        2 │
static ASSERTIONS_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*[│|]\s*assertions\s*[│|]\s*(\d+)\s*[│|]\s*(\d+)\s*[│|]").unwrap()
});

/// Read the failure count Newman reported, without counting markers.
///
/// Tries a `failures: N` line first, then the `assertions` row of the CLI
/// summary table. `None` when neither is present.
pub fn reported_failure_count(text: &str) -> Option<u64> {
    if let Some(caps) = FAILURES_LINE.captures(text) {
        return caps[1].parse().ok();
    }

    ASSERTIONS_ROW
        .captures(text)
        .and_then(|caps| caps[2].parse().ok())
}

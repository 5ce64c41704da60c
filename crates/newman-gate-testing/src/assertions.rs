//! Custom assertions for newman-gate-specific validation.
//!
//! Provides high-level assertions that make tests more readable:
//! - CI output (`key=value` / heredoc) parsing and lookups
//! - Gate report JSON checks

use anyhow::{Context, Result};
use predicates::prelude::*;
use serde_json::Value;
use std::collections::BTreeMap;

/// Parse GitHub Actions output lines into a key/value map.
///
/// Supports both `key=value` and the multi-line `key<<DELIM` form.
pub fn parse_outputs(text: &str) -> Result<BTreeMap<String, String>> {
    let mut outputs = BTreeMap::new();
    let mut lines = text.lines();

    while let Some(line) = lines.next() {
        if let Some((key, delimiter)) = line.split_once("<<").filter(|(k, _)| !k.contains('=')) {
            let mut value = Vec::new();
            loop {
                let next = lines
                    .next()
                    .with_context(|| format!("Unterminated heredoc for '{}'", key))?;
                if next == delimiter {
                    break;
                }
                value.push(next);
            }
            outputs.insert(key.to_string(), value.join("\n"));
        } else if let Some((key, value)) = line.split_once('=') {
            outputs.insert(key.to_string(), value.to_string());
        }
    }

    Ok(outputs)
}

/// Assert that an output key carries the expected value.
pub fn assert_output(text: &str, key: &str, expected: &str) -> Result<()> {
    let outputs = parse_outputs(text)?;
    let actual = outputs
        .get(key)
        .with_context(|| format!("Output '{}' not found in {:?}", key, outputs.keys()))?;

    if actual != expected {
        anyhow::bail!("Output '{}': expected {:?}, got {:?}", key, expected, actual);
    }

    Ok(())
}

/// Assert that an output key's value contains a fragment.
pub fn assert_output_contains(text: &str, key: &str, fragment: &str) -> Result<()> {
    let outputs = parse_outputs(text)?;
    let actual = outputs
        .get(key)
        .with_context(|| format!("Output '{}' not found", key))?;

    if !predicate::str::contains(fragment).eval(actual.as_str()) {
        anyhow::bail!("Output '{}' does not contain {:?}: {:?}", key, fragment, actual);
    }

    Ok(())
}

/// Assert the gate status in a JSON report (`PASS`, `WARN`, `FAIL`).
pub fn assert_gate_status(json: &Value, expected: &str) -> Result<()> {
    let status = json["status"]
        .as_str()
        .context("Expected 'status' string in JSON")?;

    if status != expected {
        anyhow::bail!("Expected gate status {}, got {}", expected, status);
    }

    Ok(())
}

/// Assert that a request is listed in a gate list with the given count.
///
/// `list` is `over_fail_requests` or `over_warn_requests`.
pub fn assert_listed(json: &Value, list: &str, request: &str, count: u64) -> Result<()> {
    let entries = json["report"]["gate"][list]
        .as_array()
        .with_context(|| format!("Expected 'report.gate.{}' array in JSON", list))?;

    let found = entries
        .iter()
        .any(|e| e["request_name"] == request && e["count"] == count);

    if !found {
        anyhow::bail!("({}, {}) not found in {}: {:?}", request, count, list, entries);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_outputs_with_heredoc() {
        let text = "assertion_error_count=2\nfailure_summary<<EOF\nline one\nline two\nEOF\n";
        let outputs = parse_outputs(text).unwrap();
        assert_eq!(outputs["assertion_error_count"], "2");
        assert_eq!(outputs["failure_summary"], "line one\nline two");
    }

    #[test]
    fn test_unterminated_heredoc_is_error() {
        assert!(parse_outputs("failure_summary<<EOF\nline\n").is_err());
    }
}

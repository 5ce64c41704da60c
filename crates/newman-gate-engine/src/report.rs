//! Newman JSON reporter output (`newman run -r json`).
//!
//! When a structured report is available its `run.failures` array is mapped
//! straight to [`FailureRecord`]s; no log patterns are involved.

use crate::FailureExtractor;
use newman_gate_types::FailureRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewmanReport {
    pub run: RunSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSection {
    #[serde(default)]
    pub stats: Option<RunStats>,
    #[serde(default)]
    pub failures: Vec<FailureEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    #[serde(default)]
    pub assertions: Option<StatCounter>,
    #[serde(default)]
    pub requests: Option<StatCounter>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatCounter {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub failed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailureEntry {
    #[serde(default)]
    pub error: Option<ErrorDescriptor>,
    #[serde(default)]
    pub source: Option<SourceRef>,
    #[serde(default)]
    pub at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub test: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewmanReport {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Failed assertion count as tallied by Newman itself, if present.
    pub fn reported_assertion_failures(&self) -> Option<u64> {
        self.run
            .stats
            .as_ref()
            .and_then(|s| s.assertions)
            .map(|a| a.failed)
    }

    /// Map every failure entry to a record, in report order.
    ///
    /// Uses the extractor for the marker fallback, the name cap and the
    /// status classification so both input paths agree.
    pub fn to_records(&self, extractor: &FailureExtractor) -> Vec<FailureRecord> {
        self.run
            .failures
            .iter()
            .map(|entry| entry.to_record(extractor))
            .collect()
    }
}

impl FailureEntry {
    fn to_record(&self, extractor: &FailureExtractor) -> FailureRecord {
        let error = self.error.as_ref();

        let error_kind = error
            .and_then(|e| non_empty(e.name.as_deref()))
            .unwrap_or(extractor.marker())
            .to_string();

        let request_name = self
            .source
            .as_ref()
            .and_then(|s| non_empty(s.name.as_deref()))
            .map(|name| extractor.cap_name(name));

        let assertion_text = error
            .and_then(|e| non_empty(e.test.as_deref()).or_else(|| non_empty(e.message.as_deref())))
            .map(str::to_string);

        let status_related = assertion_text
            .as_deref()
            .is_some_and(|text| extractor.is_status_related(text));

        FailureRecord {
            error_kind,
            request_name,
            assertion_text,
            status_related,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"{
        "collection": {"info": {"name": "Users API"}},
        "run": {
            "stats": {
                "requests": {"total": 3, "pending": 0, "failed": 0},
                "assertions": {"total": 6, "pending": 0, "failed": 2}
            },
            "failures": [
                {
                    "error": {"name": "AssertionError", "index": 0, "test": "Status code is 200",
                              "message": "expected response to have status code 200 but got 404"},
                    "at": "assertion:0 in test-script",
                    "source": {"id": "a1", "name": "Get User"}
                },
                {
                    "error": {"name": "JSONError", "message": "Unexpected token < in JSON"},
                    "source": {"id": "a2"}
                }
            ]
        }
    }"#;

    #[test]
    fn test_maps_failures_in_order() {
        let report = NewmanReport::from_json(REPORT).unwrap();
        let records = report.to_records(&FailureExtractor::default());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].error_kind, "AssertionError");
        assert_eq!(records[0].request_name.as_deref(), Some("Get User"));
        assert_eq!(records[0].assertion_text.as_deref(), Some("Status code is 200"));
        assert!(records[0].status_related);

        assert_eq!(records[1].error_kind, "JSONError");
        assert_eq!(records[1].request_name, None);
        assert_eq!(
            records[1].assertion_text.as_deref(),
            Some("Unexpected token < in JSON")
        );
        assert!(!records[1].status_related);
    }

    #[test]
    fn test_reported_assertion_failures() {
        let report = NewmanReport::from_json(REPORT).unwrap();
        assert_eq!(report.reported_assertion_failures(), Some(2));
    }

    #[test]
    fn test_missing_failures_array_is_empty() {
        let report = NewmanReport::from_json(r#"{"run": {}}"#).unwrap();
        assert!(report.to_records(&FailureExtractor::default()).is_empty());
        assert_eq!(report.reported_assertion_failures(), None);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(NewmanReport::from_json("newman run failed").is_err());
        assert!(NewmanReport::from_json(r#"{"collection": {}}"#).is_err());
    }
}

use newman_gate_types::{GateReport, RequestAggregate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_TOP_N: usize = 8;
pub const DEFAULT_SAMPLES_PER_REQUEST: usize = 2;

/// Condensed, display-ready view of the worst requests in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDigest {
    pub total_failures: u64,
    pub entries: Vec<DigestEntry>,
    /// Requests left out by the top-N cut.
    pub hidden_requests: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestEntry {
    pub request_name: String,
    pub total_count: u64,
    pub status_related_count: u64,
    /// Distinct assertion texts, first-observed order.
    pub samples: Vec<String>,
}

impl FailureDigest {
    /// Keep the first `top_n` requests of the sorted breakdown.
    pub fn build(report: &GateReport, top_n: usize, samples_per_request: usize) -> Self {
        let entries: Vec<DigestEntry> = report
            .requests
            .iter()
            .take(top_n)
            .map(|r| DigestEntry::from_aggregate(r, samples_per_request))
            .collect();
        let hidden_requests = report.requests.len() - entries.len();

        Self {
            total_failures: report.gate.global_count,
            entries,
            hidden_requests,
            truncated: hidden_requests > 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_failures == 0
    }
}

impl DigestEntry {
    fn from_aggregate(aggregate: &RequestAggregate, samples_per_request: usize) -> Self {
        Self {
            request_name: aggregate.request_name.clone(),
            total_count: aggregate.total_count,
            status_related_count: aggregate.status_related_count,
            samples: aggregate
                .by_assertion
                .iter()
                .take(samples_per_request)
                .map(|a| a.assertion.clone())
                .collect(),
        }
    }
}

/// Request name to status-related failure count, for machine consumers.
pub fn status_counts(report: &GateReport) -> BTreeMap<String, u64> {
    report
        .requests
        .iter()
        .map(|r| (r.request_name.clone(), r.status_related_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;
    use newman_gate_types::{DEFAULT_MARKER, FailureRecord, ThresholdConfig};

    fn record(request: &str, assertion: &str, status: bool) -> FailureRecord {
        FailureRecord::new(DEFAULT_MARKER)
            .with_request(request)
            .with_assertion(assertion)
            .status_related(status)
    }

    fn report() -> GateReport {
        let records = vec![
            record("Get User", "Status code is 200", true),
            record("Get User", "Body has name", false),
            record("Get User", "Body has email", false),
            record("Get User", "Status code is 200", true),
            record("List Orders", "Response time below 500ms", false),
            record("Delete Order", "Status code is 204", true),
        ];
        aggregate(&records, &ThresholdConfig::default()).unwrap()
    }

    #[test]
    fn test_top_n_cut() {
        let digest = FailureDigest::build(&report(), 2, 2);
        assert_eq!(digest.total_failures, 6);
        assert_eq!(digest.entries.len(), 2);
        assert_eq!(digest.entries[0].request_name, "Get User");
        assert_eq!(digest.entries[1].request_name, "List Orders");
        assert_eq!(digest.hidden_requests, 1);
        assert!(digest.truncated);
    }

    #[test]
    fn test_samples_are_distinct_and_capped() {
        let digest = FailureDigest::build(&report(), DEFAULT_TOP_N, DEFAULT_SAMPLES_PER_REQUEST);
        assert_eq!(
            digest.entries[0].samples,
            vec!["Status code is 200".to_string(), "Body has name".to_string()]
        );
        assert!(!digest.truncated);
    }

    #[test]
    fn test_status_counts_mapping() {
        let counts = status_counts(&report());
        assert_eq!(counts.get("Get User"), Some(&2));
        assert_eq!(counts.get("List Orders"), Some(&0));
        assert_eq!(counts.get("Delete Order"), Some(&1));
        insta::assert_json_snapshot!(counts, @r#"
        {
          "Delete Order": 1,
          "Get User": 2,
          "List Orders": 0
        }
        "#);
    }
}

use crate::ThresholdConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Count of failures sharing one assertion description within a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionCount {
    pub assertion: String,
    pub count: u64,
}

/// All failures attributed to one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestAggregate {
    pub request_name: String,
    pub total_count: u64,
    /// Per-assertion counts in first-observed order.
    pub by_assertion: Vec<AssertionCount>,
    pub status_related_count: u64,
}

impl RequestAggregate {
    pub fn new(request_name: impl Into<String>) -> Self {
        Self {
            request_name: request_name.into(),
            total_count: 0,
            by_assertion: Vec::new(),
            status_related_count: 0,
        }
    }

    pub fn assertion_count(&self, assertion: &str) -> u64 {
        self.by_assertion
            .iter()
            .find(|a| a.assertion == assertion)
            .map(|a| a.count)
            .unwrap_or(0)
    }
}

/// A request that crossed a per-request threshold, with its status-related count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCount {
    pub request_name: String,
    pub count: u64,
}

impl RequestCount {
    pub fn new(request_name: impl Into<String>, count: u64) -> Self {
        Self {
            request_name: request_name.into(),
            count,
        }
    }
}

/// Pass/fail decisions for one run.
///
/// `over_fail_requests` and `over_warn_requests` never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    pub global_count: u64,
    pub global_pass: bool,
    pub over_fail_requests: Vec<RequestCount>,
    pub over_warn_requests: Vec<RequestCount>,
    pub overall_pass: bool,
}

impl GateResult {
    pub fn outcome(&self) -> GateOutcome {
        if !self.overall_pass {
            GateOutcome::Fail
        } else if !self.over_warn_requests.is_empty() {
            GateOutcome::Warn
        } else {
            GateOutcome::Pass
        }
    }
}

/// Three-level classification derived from a [`GateResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateOutcome {
    Pass,
    Warn,
    Fail,
}

impl GateOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateOutcome::Pass => "PASS",
            GateOutcome::Warn => "WARN",
            GateOutcome::Fail => "FAIL",
        }
    }

    /// Only FAIL blocks the pipeline; WARN is advisory.
    pub fn is_blocking(&self) -> bool {
        matches!(self, GateOutcome::Fail)
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation output: the gate decision plus the sorted per-request breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReport {
    pub thresholds: ThresholdConfig,
    pub gate: GateResult,
    /// Sorted by `total_count` descending, ties in first-observed order.
    pub requests: Vec<RequestAggregate>,
}

impl GateReport {
    pub fn outcome(&self) -> GateOutcome {
        self.gate.outcome()
    }

    pub fn request(&self, name: &str) -> Option<&RequestAggregate> {
        self.requests.iter().find(|r| r.request_name == name)
    }
}

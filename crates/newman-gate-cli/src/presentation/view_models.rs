use newman_gate_engine::FailureDigest;
use newman_gate_types::{GateOutcome, GateReport};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything `check` shows, in one serializable shape.
#[derive(Debug, Clone, Serialize)]
pub struct GateViewModel {
    pub status: GateOutcome,
    /// Log or report the run was computed from.
    pub source: String,
    pub marker: String,
    pub report: GateReport,
    pub digest: FailureDigest,
    /// Request name to status-related failure count.
    pub status_failures: BTreeMap<String, u64>,
}

/// Result of the reported-summary gate (`count`).
#[derive(Debug, Clone, Serialize)]
pub struct CountViewModel {
    pub source: String,
    pub failure_count: u64,
    pub max: u64,
    pub status: GateOutcome,
}

use newman_gate_types::{
    AssertionCount, FailureRecord, GateReport, GateResult, RequestAggregate, RequestCount, Result,
    ThresholdConfig,
};
use std::collections::HashMap;
use tracing::debug;

/// Group failures by request and gate the counts against `thresholds`.
///
/// Pure and total over its inputs; the only error is an invalid config,
/// which is rejected before any counting happens.
pub fn aggregate(records: &[FailureRecord], thresholds: &ThresholdConfig) -> Result<GateReport> {
    thresholds.validate()?;

    let requests = group_by_request(records);
    let global_count = records.len() as u64;
    let global_pass = global_count <= thresholds.global_max;

    let mut over_fail_requests: Vec<RequestCount> = requests
        .iter()
        .filter(|r| r.status_related_count > thresholds.per_request_fail_max)
        .map(|r| RequestCount::new(&r.request_name, r.status_related_count))
        .collect();
    over_fail_requests.sort_by(|a, b| b.count.cmp(&a.count));

    // WARN covers only what FAIL did not already claim.
    let mut over_warn_requests: Vec<RequestCount> = requests
        .iter()
        .filter(|r| {
            r.status_related_count > thresholds.per_request_warn_max
                && r.status_related_count <= thresholds.per_request_fail_max
        })
        .map(|r| RequestCount::new(&r.request_name, r.status_related_count))
        .collect();
    over_warn_requests.sort_by(|a, b| b.count.cmp(&a.count));

    let overall_pass = global_pass && over_fail_requests.is_empty();

    debug!(
        global_count,
        global_pass,
        over_fail = over_fail_requests.len(),
        over_warn = over_warn_requests.len(),
        "aggregated failures"
    );

    Ok(GateReport {
        thresholds: *thresholds,
        gate: GateResult {
            global_count,
            global_pass,
            over_fail_requests,
            over_warn_requests,
            overall_pass,
        },
        requests,
    })
}

/// Fold records into per-request aggregates sorted by total count, descending.
///
/// Ties keep first-observed order (`sort_by` is stable).
pub fn group_by_request(records: &[FailureRecord]) -> Vec<RequestAggregate> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut requests: Vec<RequestAggregate> = Vec::new();

    for record in records {
        let label = record.request_label();
        let slot = *index.entry(label).or_insert_with(|| {
            requests.push(RequestAggregate::new(label));
            requests.len() - 1
        });
        let entry = &mut requests[slot];

        entry.total_count += 1;
        if record.status_related {
            entry.status_related_count += 1;
        }

        let assertion = record.assertion_label();
        match entry
            .by_assertion
            .iter_mut()
            .find(|a| a.assertion == assertion)
        {
            Some(existing) => existing.count += 1,
            None => entry.by_assertion.push(AssertionCount {
                assertion: assertion.to_string(),
                count: 1,
            }),
        }
    }

    requests.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    requests
}

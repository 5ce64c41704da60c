use newman_gate_engine::{FailureExtractor, aggregate, gate_log};
use newman_gate_testing::NewmanLog;
use newman_gate_types::{GateReport, RequestCount, ThresholdConfig};

fn gate(text: &str, thresholds: ThresholdConfig) -> GateReport {
    gate_log(text, &FailureExtractor::default(), &thresholds).expect("valid thresholds")
}

#[test]
fn test_four_markers_fail_global_gate() {
    let log = NewmanLog::new("Users API")
        .failing("Get User", "Body has name")
        .failing("Get User", "Body has email")
        .failing("List Users", "Has items")
        .failing("Delete User", "Returns empty body")
        .render();

    let report = gate(&log, ThresholdConfig::new(3, 3, None));
    assert_eq!(report.gate.global_count, 4);
    assert!(!report.gate.global_pass);
    assert!(!report.gate.overall_pass);
}

#[test]
fn test_status_failure_over_zero_fail_threshold() {
    let log = "AssertionError: Status code is 200\n  at assertion:0\n  inside \"Get User\"\n";

    let report = gate(log, ThresholdConfig::new(3, 0, None));
    assert_eq!(
        report.gate.over_fail_requests,
        vec![RequestCount::new("Get User", 1)]
    );
}

#[test]
fn test_non_status_failure_does_not_count_per_request() {
    let log = NewmanLog::new("Users API")
        .failing("Get User", "Status code is 200")
        .failing("Get User", "Body has name")
        .render();

    let report = gate(&log, ThresholdConfig::new(3, 1, None));
    let user = report.request("Get User").expect("aggregate for Get User");
    assert_eq!(user.total_count, 2);
    assert_eq!(user.status_related_count, 1);
    assert!(report.gate.over_fail_requests.is_empty());
    assert!(report.gate.overall_pass);
}

#[test]
fn test_request_between_warn_and_fail_is_warn_only() {
    let log = NewmanLog::new("Users API")
        .failing_times("Get User", "Status code is 200", 4)
        .render();

    let report = gate(&log, ThresholdConfig::new(10, 5, Some(3)));
    assert_eq!(
        report.gate.over_warn_requests,
        vec![RequestCount::new("Get User", 4)]
    );
    assert!(report.gate.over_fail_requests.is_empty());
    assert!(report.gate.overall_pass);
}

#[test]
fn test_warn_above_fail_is_a_configuration_error() {
    let log = NewmanLog::new("Users API")
        .failing_times("Get User", "Status code is 200", 4)
        .render();

    let err = gate_log(
        &log,
        &FailureExtractor::default(),
        &ThresholdConfig::new(10, 3, Some(5)),
    )
    .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_empty_input() {
    let records = FailureExtractor::default().extract("");
    assert!(records.is_empty());

    let report = aggregate(&records, &ThresholdConfig::default()).unwrap();
    assert!(report.gate.global_pass);
    assert!(report.gate.over_fail_requests.is_empty());
    assert!(report.gate.over_warn_requests.is_empty());
}

#[test]
fn test_passing_run_has_no_failures() {
    let log = NewmanLog::new("Users API")
        .passing("Get User", "Status code is 200")
        .passing("List Users", "Has items")
        .render();

    let report = gate(&log, ThresholdConfig::new(0, 0, None));
    assert_eq!(report.gate.global_count, 0);
    assert!(report.gate.overall_pass);
}

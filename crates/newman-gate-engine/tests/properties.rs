use newman_gate_engine::{FailureExtractor, gate_log};
use newman_gate_testing::NewmanLog;
use newman_gate_types::ThresholdConfig;

fn mixed_log() -> NewmanLog {
    NewmanLog::new("Orders API")
        .failing_times("Create Order", "Status code is 201", 3)
        .failing("Create Order", "Body has id")
        .failing_times("Get Order", "Response code is 200", 2)
        .failing_unscoped("List Orders", "Has items")
        .failing_unscoped("List Orders", "Status code is 200")
        .passing("List Orders", "Response time is below 500ms")
}

#[test]
fn test_global_count_equals_marker_count() {
    let log = mixed_log();
    let text = log.render();
    let report = gate_log(&text, &FailureExtractor::default(), &ThresholdConfig::default()).unwrap();

    assert_eq!(report.gate.global_count, log.failure_count() as u64);
    assert_eq!(
        report.gate.global_count,
        text.matches("AssertionError").count() as u64
    );
}

#[test]
fn test_unscoped_failures_still_count() {
    let text = mixed_log().render();
    let report = gate_log(&text, &FailureExtractor::default(), &ThresholdConfig::default()).unwrap();

    let unknown = report
        .request(newman_gate_types::UNKNOWN_REQUEST)
        .expect("unknown request bucket");
    assert_eq!(unknown.total_count, 2);
    assert_eq!(unknown.status_related_count, 1);
}

#[test]
fn test_rerun_is_identical() {
    let text = mixed_log().render();
    let extractor = FailureExtractor::default();
    let thresholds = ThresholdConfig::new(5, 2, Some(1));

    let first = gate_log(&text, &extractor, &thresholds).unwrap();
    let second = gate_log(&text, &extractor, &thresholds).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_global_gate_is_monotonic() {
    let text = mixed_log().render();
    let extractor = FailureExtractor::default();

    let results: Vec<bool> = (0..12)
        .map(|max| {
            gate_log(&text, &extractor, &ThresholdConfig::new(max, 100, None))
                .unwrap()
                .gate
                .global_pass
        })
        .collect();

    let first_pass = results.iter().position(|pass| *pass).expect("passes eventually");
    assert_eq!(first_pass, 8);
    assert!(results[first_pass..].iter().all(|pass| *pass));
    assert!(results[..first_pass].iter().all(|pass| !*pass));
}

#[test]
fn test_warn_and_fail_partition() {
    let text = mixed_log().render();
    let extractor = FailureExtractor::default();

    for fail_max in 0..4 {
        for warn_max in 0..=fail_max {
            let report = gate_log(
                &text,
                &extractor,
                &ThresholdConfig::new(100, fail_max, Some(warn_max)),
            )
            .unwrap();

            for warn in &report.gate.over_warn_requests {
                assert!(
                    !report
                        .gate
                        .over_fail_requests
                        .iter()
                        .any(|fail| fail.request_name == warn.request_name),
                    "{} listed as both WARN and FAIL (fail {}, warn {})",
                    warn.request_name,
                    fail_max,
                    warn_max
                );
            }
        }
    }
}

#[test]
fn test_long_request_name_is_capped() {
    let name = "Q".repeat(250);
    let text = NewmanLog::new("Long API")
        .failing(&name, "Status code is 200")
        .render();

    let report = gate_log(&text, &FailureExtractor::default(), &ThresholdConfig::default()).unwrap();
    assert_eq!(report.requests.len(), 1);
    assert_eq!(report.requests[0].request_name, "Q".repeat(200));
}

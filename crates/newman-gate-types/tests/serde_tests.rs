use newman_gate_types::{FailureRecord, GateOutcome, ThresholdConfig};

#[test]
fn test_record_without_status_flag_deserializes() {
    let record: FailureRecord = serde_json::from_str(
        r#"{"error_kind": "AssertionError", "request_name": "Get User", "assertion_text": null}"#,
    )
    .unwrap();

    assert_eq!(record.request_label(), "Get User");
    assert_eq!(record.assertion_text, None);
    assert!(!record.status_related);
}

#[test]
fn test_threshold_config_field_names() {
    let json = serde_json::to_value(ThresholdConfig::new(3, 5, Some(2))).unwrap();
    assert_eq!(json["global_max"], 3);
    assert_eq!(json["per_request_fail_max"], 5);
    assert_eq!(json["per_request_warn_max"], 2);
}

#[test]
fn test_outcome_roundtrip_labels() {
    for outcome in [GateOutcome::Pass, GateOutcome::Warn, GateOutcome::Fail] {
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, format!("\"{}\"", outcome.as_str()));
    }
}

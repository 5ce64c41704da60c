use crate::args::ThresholdArgs;
use crate::config::Config;
use crate::output::{GithubOutput, OutputTarget};
use crate::presentation::chat::render_summary;
use crate::presentation::{ConsoleRenderer, GateViewModel};
use crate::types::OutputFormat;
use anyhow::{Result, bail};
use newman_gate_engine::source::{read_log, read_report};
use newman_gate_engine::{FailureDigest, FailureExtractor, gate_log, gate_report, status_counts};
use newman_gate_types::{GateOutcome, RequestCount};
use std::path::PathBuf;
use tracing::{info, warn};

pub struct CheckRequest {
    pub log: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub thresholds: ThresholdArgs,
    pub top: Option<usize>,
    pub format: OutputFormat,
    pub github_output: Option<PathBuf>,
}

pub fn handle(config: &Config, request: CheckRequest) -> Result<GateOutcome> {
    let thresholds = config.thresholds(&request.thresholds);
    thresholds.validate()?;
    let extractor = FailureExtractor::new(&config.extractor)?;

    let (source, report) = match (&request.report, &request.log) {
        (Some(path), _) => {
            let parsed = read_report(path)?;
            if let Some(reported) = parsed.reported_assertion_failures()
                && reported != parsed.run.failures.len() as u64
            {
                warn!(
                    reported,
                    listed = parsed.run.failures.len(),
                    "report stats disagree with failure list"
                );
            }
            (path, gate_report(&parsed, &extractor, &thresholds)?)
        }
        (None, Some(path)) => {
            let text = read_log(path)?;
            (path, gate_log(&text, &extractor, &thresholds)?)
        }
        (None, None) => bail!("Input not available: no log or report given"),
    };

    let unresolved = report
        .request(newman_gate_types::UNKNOWN_REQUEST)
        .map(|r| r.total_count)
        .unwrap_or(0);
    if unresolved > 0 {
        warn!(unresolved, "failures without a resolvable request name");
    }

    let digest = FailureDigest::build(
        &report,
        config.top(request.top),
        config.samples_per_request(),
    );
    let view = GateViewModel {
        status: report.outcome(),
        source: source.display().to_string(),
        marker: extractor.marker().to_string(),
        status_failures: status_counts(&report),
        digest,
        report,
    };
    info!(status = %view.status, failures = view.report.gate.global_count, "gate evaluated");

    if let Some(target) = OutputTarget::from_flag_or_env(request.github_output) {
        step_outputs(&view, &super::display_name(source))?.write_to(&target)?;
    }

    let renderer = ConsoleRenderer::new(request.format);
    renderer.render_gate(&view)?;
    renderer.render_verdict(view.status, &verdict_message(&view));

    Ok(view.status)
}

fn step_outputs(view: &GateViewModel, source_name: &str) -> Result<GithubOutput> {
    let gate = &view.report.gate;
    let mut outputs = GithubOutput::new();
    outputs
        .set("assertion_error_count", gate.global_count)
        .set("global_pass", gate.global_pass)
        .set("overall_pass", gate.overall_pass)
        .set("gate_status", view.status)
        .set(
            "over_fail_requests",
            serde_json::to_string(&gate.over_fail_requests)?,
        )
        .set(
            "over_warn_requests",
            serde_json::to_string(&gate.over_warn_requests)?,
        )
        .set(
            "status_failures_json",
            serde_json::to_string(&view.status_failures)?,
        )
        .set(
            "failure_summary",
            render_summary(&view.digest, &view.marker, source_name),
        );
    Ok(outputs)
}

fn verdict_message(view: &GateViewModel) -> String {
    let gate = &view.report.gate;
    let thresholds = &view.report.thresholds;

    match view.status {
        GateOutcome::Pass => format!(
            "{} count ({}) is within threshold ({})",
            view.marker, gate.global_count, thresholds.global_max
        ),
        GateOutcome::Warn => format!(
            "status failures above WARN threshold ({}): {}",
            thresholds.per_request_warn_max,
            list(&gate.over_warn_requests)
        ),
        GateOutcome::Fail => {
            let mut reasons = Vec::new();
            if !gate.global_pass {
                reasons.push(format!(
                    "{} count ({}) exceeded threshold ({})",
                    view.marker, gate.global_count, thresholds.global_max
                ));
            }
            if !gate.over_fail_requests.is_empty() {
                reasons.push(format!(
                    "status failures above FAIL threshold ({}): {}",
                    thresholds.per_request_fail_max,
                    list(&gate.over_fail_requests)
                ));
            }
            reasons.join("; ")
        }
    }
}

fn list(requests: &[RequestCount]) -> String {
    requests
        .iter()
        .map(|r| format!("{} ({})", r.request_name, r.count))
        .collect::<Vec<_>>()
        .join(", ")
}

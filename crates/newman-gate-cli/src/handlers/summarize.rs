use crate::config::Config;
use crate::output::{GithubOutput, OutputTarget};
use crate::presentation::chat::render_summary;
use anyhow::Result;
use newman_gate_engine::source::read_log;
use newman_gate_engine::{FailureDigest, FailureExtractor, aggregate};
use newman_gate_types::{GateOutcome, ThresholdConfig};
use std::path::{Path, PathBuf};

/// Emit `assertion_error_count` and `failure_summary`. Never gates.
pub fn handle(
    config: &Config,
    log: &Path,
    top: Option<usize>,
    github_output: Option<PathBuf>,
) -> Result<GateOutcome> {
    let extractor = FailureExtractor::new(&config.extractor)?;
    let text = read_log(log)?;
    let records = extractor.extract(&text);

    // Thresholds play no part in the summary; defaults keep aggregation total.
    let report = aggregate(&records, &ThresholdConfig::default())?;
    let digest = FailureDigest::build(&report, config.top(top), config.samples_per_request());

    let mut outputs = GithubOutput::new();
    outputs
        .set("assertion_error_count", records.len())
        .set(
            "failure_summary",
            render_summary(&digest, extractor.marker(), &super::display_name(log)),
        );

    let target = github_output
        .map(OutputTarget::File)
        .unwrap_or(OutputTarget::Stdout);
    outputs.write_to(&target)?;

    Ok(GateOutcome::Pass)
}

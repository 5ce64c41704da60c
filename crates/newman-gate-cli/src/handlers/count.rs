use crate::presentation::{ConsoleRenderer, CountViewModel};
use crate::types::CountFormat;
use anyhow::{Result, anyhow};
use newman_gate_engine::reported_failure_count;
use newman_gate_engine::source::read_log;
use newman_gate_types::GateOutcome;
use std::path::Path;

pub fn handle(log: &Path, max: u64, format: CountFormat) -> Result<GateOutcome> {
    let text = read_log(log)?;
    let failure_count = reported_failure_count(&text)
        .ok_or_else(|| anyhow!("Could not find failure count in Newman output"))?;

    let status = if failure_count > max {
        GateOutcome::Fail
    } else {
        GateOutcome::Pass
    };
    let view = CountViewModel {
        source: log.display().to_string(),
        failure_count,
        max,
        status,
    };

    let renderer = ConsoleRenderer::new(format.into());
    renderer.render_count(&view)?;
    match status {
        GateOutcome::Fail => renderer.render_verdict(
            status,
            &format!(
                "Failure count ({}) exceeded threshold ({})",
                failure_count, max
            ),
        ),
        _ => renderer.render_verdict(status, "Failure count is within threshold"),
    }

    Ok(status)
}

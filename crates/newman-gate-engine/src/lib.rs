// Engine module - Core processing logic (extraction, aggregation, digest)
// This layer sits between raw Newman output and CLI presentation

pub mod aggregate;
pub mod digest;
pub mod error;
pub mod extract;
pub mod report;
pub mod source;
pub mod summary_count;

pub use aggregate::aggregate;
pub use digest::{DigestEntry, FailureDigest, status_counts};
pub use error::{Error, Result};
pub use extract::{ExtractorConfig, FailureExtractor};
pub use report::NewmanReport;
pub use summary_count::reported_failure_count;

use newman_gate_types::{GateReport, ThresholdConfig};

// Façade API - Stable public interface for CLI layer

/// Extract failures from raw log text and aggregate them against thresholds.
pub fn gate_log(
    text: &str,
    extractor: &FailureExtractor,
    thresholds: &ThresholdConfig,
) -> Result<GateReport> {
    let records = extractor.extract(text);
    Ok(aggregate(&records, thresholds)?)
}

/// Aggregate a structured report's failures against thresholds.
pub fn gate_report(
    report: &NewmanReport,
    extractor: &FailureExtractor,
    thresholds: &ThresholdConfig,
) -> Result<GateReport> {
    let records = report.to_records(extractor);
    Ok(aggregate(&records, thresholds)?)
}

use crate::report::NewmanReport;
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Read a Newman CLI log in full.
pub fn read_log(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "loaded log");
    Ok(text)
}

/// Read and parse a Newman JSON report.
pub fn read_report(path: &Path) -> Result<NewmanReport> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let report = NewmanReport::from_json(&text).map_err(|source| Error::MalformedReport {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        failures = report.run.failures.len(),
        "loaded report"
    );
    Ok(report)
}

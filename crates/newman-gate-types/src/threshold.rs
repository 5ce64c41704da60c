use crate::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GLOBAL_MAX: u64 = 3;
pub const DEFAULT_PER_REQUEST_FAIL_MAX: u64 = 3;

/// Numeric limits the gate compares counts against.
///
/// All comparisons are strict: a count equal to its limit still passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Maximum total failures before the global gate fails.
    pub global_max: u64,
    /// Maximum status-related failures per request before FAIL.
    pub per_request_fail_max: u64,
    /// Maximum status-related failures per request before WARN.
    pub per_request_warn_max: u64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GLOBAL_MAX, DEFAULT_PER_REQUEST_FAIL_MAX, None)
    }
}

impl ThresholdConfig {
    /// Build a config; `warn_max` defaults to `fail_max` when omitted.
    pub fn new(global_max: u64, fail_max: u64, warn_max: Option<u64>) -> Self {
        Self {
            global_max,
            per_request_fail_max: fail_max,
            per_request_warn_max: warn_max.unwrap_or(fail_max),
        }
    }

    /// Reject a WARN limit above the FAIL limit. Never corrects it silently.
    pub fn validate(&self) -> Result<()> {
        if self.per_request_warn_max > self.per_request_fail_max {
            return Err(Error::ConfigurationInvalid(format!(
                "per-request WARN threshold ({}) exceeds FAIL threshold ({})",
                self.per_request_warn_max, self.per_request_fail_max
            )));
        }
        Ok(())
    }
}

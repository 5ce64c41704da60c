// NOTE: newman-gate exit code contract
//
// 0 - PASS, or WARN only (advisory findings never block a pipeline)
// 1 - gate violation: global count or a per-request FAIL threshold crossed
// 2 - fatal: missing/unreadable input, malformed report, invalid configuration
//
// Fatal errors abort before any CI output is written, so a failed run never
// leaves half a set of outputs behind.

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod output;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, ThresholdArgs};
pub use commands::run;

pub mod exit_code {
    use newman_gate_types::GateOutcome;

    pub const PASS: i32 = 0;
    pub const GATE_FAILED: i32 = 1;
    pub const FATAL: i32 = 2;

    pub fn for_outcome(outcome: GateOutcome) -> i32 {
        if outcome.is_blocking() {
            GATE_FAILED
        } else {
            PASS
        }
    }
}

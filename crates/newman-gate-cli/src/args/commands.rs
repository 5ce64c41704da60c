use crate::types::{CountFormat, OutputFormat};
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Count failures per request and gate them against thresholds")]
    Check {
        /// Newman CLI log
        #[arg(required_unless_present = "report")]
        log: Option<PathBuf>,

        /// Newman JSON report; used instead of scanning the log
        #[arg(long)]
        report: Option<PathBuf>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Requests shown in the summary
        #[arg(long)]
        top: Option<usize>,

        #[arg(long, default_value = "plain")]
        format: OutputFormat,

        /// File to append CI outputs to (default: $GITHUB_OUTPUT)
        #[arg(long)]
        github_output: Option<PathBuf>,
    },

    #[command(about = "Summarize failures per request for chat notifications")]
    Summarize {
        /// Newman CLI log
        #[arg(default_value = "report/newman.log")]
        log: PathBuf,

        /// Requests shown in the summary
        #[arg(long)]
        top: Option<usize>,

        /// File to append CI outputs to (default: stdout)
        #[arg(long)]
        github_output: Option<PathBuf>,
    },

    #[command(about = "Gate on the failure count Newman printed in its run summary")]
    Count {
        /// Newman CLI log
        log: PathBuf,

        /// Highest failure count that still passes
        #[arg(long, default_value = "3")]
        max: u64,

        #[arg(long, default_value = "plain")]
        format: CountFormat,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdArgs {
    /// Highest total failure count that still passes [default: 3]
    #[arg(long)]
    pub global_max: Option<u64>,

    /// Highest status-code failure count per request before FAIL [default: 3]
    #[arg(long)]
    pub fail_max: Option<u64>,

    /// Highest status-code failure count per request before WARN [default: fail-max]
    #[arg(long)]
    pub warn_max: Option<u64>,
}

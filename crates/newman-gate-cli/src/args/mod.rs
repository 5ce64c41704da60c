mod commands;

pub use commands::*;

use crate::types::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newman-gate")]
#[command(about = "Gate CI runs on Newman assertion failures", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./newman-gate.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

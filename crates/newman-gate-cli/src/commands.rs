use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use anyhow::Result;
use newman_gate_types::GateOutcome;

pub fn run(cli: Cli) -> Result<GateOutcome> {
    let cwd = std::env::current_dir()?;
    let config = Config::resolve(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Check {
            log,
            report,
            thresholds,
            top,
            format,
            github_output,
        } => handlers::check::handle(
            &config,
            handlers::check::CheckRequest {
                log,
                report,
                thresholds,
                top,
                format,
                github_output,
            },
        ),

        Commands::Summarize {
            log,
            top,
            github_output,
        } => handlers::summarize::handle(&config, &log, top, github_output),

        Commands::Count { log, max, format } => handlers::count::handle(&log, max, format),
    }
}

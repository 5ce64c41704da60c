use super::view_models::{CountViewModel, GateViewModel};
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use newman_gate_types::GateOutcome;
use owo_colors::OwoColorize;
use std::fmt::Write as _;

pub struct ConsoleRenderer {
    format: OutputFormat,
    color: bool,
}

impl ConsoleRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render_gate(&self, view: &GateViewModel) -> Result<()> {
        let text = match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(view)?),
            OutputFormat::Csv => gate_csv(view)?,
            OutputFormat::Plain => self.gate_text(view),
        };
        print!("{}", text);
        Ok(())
    }

    pub fn render_count(&self, view: &CountViewModel) -> Result<()> {
        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(view)?);
            return Ok(());
        }

        println!("Newman failure count: {}", view.failure_count);
        println!("Allowed max failures: {}", view.max);
        Ok(())
    }

    /// One-line verdict; blocking outcomes go to stderr.
    pub fn render_verdict(&self, outcome: GateOutcome, message: &str) {
        if self.format != OutputFormat::Plain && !outcome.is_blocking() {
            return;
        }
        let line = format!("{} {}", self.badge(outcome), message);
        if outcome.is_blocking() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn badge(&self, outcome: GateOutcome) -> String {
        let label = format!("[{}]", outcome);
        if !self.color {
            return label;
        }
        match outcome {
            GateOutcome::Pass => label.green().bold().to_string(),
            GateOutcome::Warn => label.yellow().bold().to_string(),
            GateOutcome::Fail => label.red().bold().to_string(),
        }
    }

    pub(crate) fn gate_text(&self, view: &GateViewModel) -> String {
        let gate = &view.report.gate;
        let thresholds = &view.report.thresholds;
        let mut out = String::new();

        let _ = writeln!(out, "{} {}", self.badge(view.status), view.source);
        let _ = writeln!(
            out,
            "  {} count: {} (max {}){}",
            view.marker,
            gate.global_count,
            thresholds.global_max,
            if gate.global_pass { "" } else { " - exceeded" }
        );
        let _ = writeln!(
            out,
            "  Per-request status failures: FAIL > {}, WARN > {}",
            thresholds.per_request_fail_max, thresholds.per_request_warn_max
        );

        if !gate.over_fail_requests.is_empty() {
            let _ = writeln!(out, "\n{}", self.badge(GateOutcome::Fail));
            for r in &gate.over_fail_requests {
                let _ = writeln!(out, "  - {}: {}", r.request_name, r.count);
            }
        }

        if !gate.over_warn_requests.is_empty() {
            let _ = writeln!(out, "\n{}", self.badge(GateOutcome::Warn));
            for r in &gate.over_warn_requests {
                let _ = writeln!(out, "  - {}: {}", r.request_name, r.count);
            }
        }

        if !view.digest.entries.is_empty() {
            let _ = writeln!(out, "\nTop requests:");
            for entry in &view.digest.entries {
                let _ = writeln!(
                    out,
                    "  {} (total {}, status {})",
                    entry.request_name, entry.total_count, entry.status_related_count
                );
                for sample in &entry.samples {
                    let _ = writeln!(out, "    • {}", sample);
                }
            }
            if view.digest.truncated {
                let _ = writeln!(out, "  … {} more request(s)", view.digest.hidden_requests);
            }
        }

        out
    }
}

fn gate_csv(view: &GateViewModel) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["request", "total", "status_related"])?;
    for r in &view.report.requests {
        writer.write_record([
            r.request_name.as_str(),
            r.total_count.to_string().as_str(),
            r.status_related_count.to_string().as_str(),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("{}", e))?;
    Ok(String::from_utf8(bytes)?)
}

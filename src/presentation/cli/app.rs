use clap::Parser;
use std::path::PathBuf;

use crate::application::config::ReportConfig;
use crate::presentation::cli::commands::check::CheckOptions;

/// hostcheck: one-shot host health triage
///
/// Samples CPU, memory, disk, network and the process table, classifies each
/// against warning/critical thresholds and reports one overall verdict.
/// Exit code: 0 healthy, 1 warning, 2 critical, 3 error, 130 interrupted.
#[derive(Parser, Debug)]
#[command(name = "hostcheck")]
#[command(version, about, long_about)]
pub struct Cli {
    /// Path to custom config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print the final verdict line and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Where to write the JSON report (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not write the JSON report file
    #[arg(long, conflicts_with = "output")]
    pub no_export: bool,

    /// Print the JSON report to stdout instead of the console report
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Tracing filter directive for the selected verbosity.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Resolves output options against the `[report]` config section.
    #[must_use]
    pub fn check_options(&self, report: &ReportConfig) -> CheckOptions {
        let export_path = if self.no_export {
            None
        } else {
            Some(
                self.output
                    .clone()
                    .unwrap_or_else(|| report.output_path.clone()),
            )
        };
        CheckOptions {
            quiet: self.quiet,
            json: self.json,
            pretty: report.pretty,
            export_path,
        }
    }
}

use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use crate::application::services::HealthCheckService;
use crate::domain::health::classify_alert;
use crate::domain::ports::{DependencyProbe, ReportSink};
use crate::domain::value_objects::StatusLevel;
use crate::infrastructure::probes::run_probes;
use crate::presentation::cli::formatters::{format_alert, render_structured, render_text};

/// Exit code for a run cut short by Ctrl+C.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Output choices for one `check` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    pub quiet: bool,
    pub json: bool,
    pub pretty: bool,
    /// `None` disables the report file.
    pub export_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Completed {
        overall: StatusLevel,
        /// Path actually written, `None` if export was disabled or failed.
        exported: Option<PathBuf>,
    },
    Interrupted,
}

impl CheckOutcome {
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Completed { overall, .. } => classify_alert(*overall).exit_code(),
            Self::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

/// Run one health check: collect, probe dependencies, report, export, alert.
///
/// Collection runs on a blocking thread (the CPU sample sleeps for its
/// interval). Ctrl+C before the report is built abandons the run without
/// writing anything. An export failure is printed to stderr and leaves the
/// outcome untouched.
///
/// # Errors
///
/// Returns an error if the collection task panics, if no subsystem could be
/// measured, or if writing to `out` fails.
pub async fn run_check<W: Write>(
    service: HealthCheckService,
    probes: Vec<Box<dyn DependencyProbe>>,
    sink: &dyn ReportSink,
    options: &CheckOptions,
    out: &mut W,
) -> anyhow::Result<CheckOutcome> {
    run_check_until(
        service,
        probes,
        sink,
        options,
        out,
        tokio::signal::ctrl_c(),
    )
    .await
}

/// Resolves when `signal` reports an interrupt.
///
/// If the signal handler cannot be installed the run continues
/// uninterruptible instead of being reported as interrupted.
async fn interrupt_requested(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable, run cannot be interrupted");
        std::future::pending::<()>().await;
    }
}

async fn run_check_until<W: Write>(
    service: HealthCheckService,
    probes: Vec<Box<dyn DependencyProbe>>,
    sink: &dyn ReportSink,
    options: &CheckOptions,
    out: &mut W,
    signal: impl Future<Output = std::io::Result<()>>,
) -> anyhow::Result<CheckOutcome> {
    let shutdown = interrupt_requested(signal);
    tokio::pin!(shutdown);

    let collection = tokio::task::spawn_blocking(move || service.collect());
    let pass = tokio::select! {
        joined = collection => joined.context("Collection task failed")?,
        () = &mut shutdown => return Ok(CheckOutcome::Interrupted),
    };

    let dependencies = tokio::select! {
        checks = run_probes(&probes) => checks,
        () = &mut shutdown => return Ok(CheckOutcome::Interrupted),
    };

    let report = pass.into_report(dependencies)?;
    let structured = render_structured(&report, options.pretty)?;

    if options.json {
        out.write_all(&structured)?;
    } else if !options.quiet {
        write!(out, "{}", render_text(&report))?;
    }

    let exported = match &options.export_path {
        Some(path) => match sink.write(path, &structured) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "health report exported");
                if !options.json && !options.quiet {
                    writeln!(out, "\nHealth report exported to: {}", path.display())?;
                }
                Some(path.clone())
            }
            Err(e) => {
                eprintln!("Export failed: {e}");
                None
            }
        },
        None => None,
    };

    let alert = classify_alert(report.overall());
    if options.json {
        // Keep stdout pure JSON.
        eprintln!("{}", format_alert(&alert));
    } else {
        writeln!(out, "\n{}", format_alert(&alert))?;
    }

    Ok(CheckOutcome::Completed {
        overall: report.overall(),
        exported,
    })
}

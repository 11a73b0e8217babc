use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hostcheck::application::config::AppConfig;
use hostcheck::application::services::HealthCheckService;
use hostcheck::infrastructure::collectors::SysinfoProvider;
use hostcheck::infrastructure::export::FileReportSink;
use hostcheck::infrastructure::probes::{build_probes, ProbeCapabilities};
use hostcheck::presentation::cli::app::Cli;
use hostcheck::presentation::cli::commands::check::{run_check, CheckOutcome};

/// Exit code when the check could not produce a report at all.
const EXIT_FAILURE: u8 = 3;

fn setup_tracing(cli: &Cli) {
    let filter = EnvFilter::new(cli.log_level());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<CheckOutcome> {
    let config = AppConfig::load(cli.config.as_deref())?;

    // Manual DI: main.rs is the only place that knows concrete types
    let provider =
        SysinfoProvider::new(Duration::from_millis(config.collection.cpu_sample_ms));
    let service = HealthCheckService::new(
        Box::new(provider.clone()),
        Box::new(provider),
        config.evaluator(),
    );
    let probes = build_probes(&config.dependencies, ProbeCapabilities::detect());
    let options = cli.check_options(&config.report);

    run_check(service, probes, &FileReportSink, &options, &mut std::io::stdout()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(&cli);

    match run(&cli).await {
        Ok(CheckOutcome::Interrupted) => {
            println!("\n\nHealth check interrupted by user.");
            ExitCode::from(CheckOutcome::Interrupted.exit_code())
        }
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("\nError during health check: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

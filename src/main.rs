//! role-probe binary
//!
//! Runs the conversation battery against the configured endpoint. Exits 0 once
//! every case has been attempted, whatever the individual outcomes.

use clap::Parser;
use role_probe::cli::{Cli, Command};
use role_probe::conversation::battery;
use role_probe::report::Reporter;
use role_probe::runner::{Runner, select_cases};
use role_probe::telemetry;
use std::process::ExitCode;

/// Exit code for configuration errors, detected before any request is sent
const EXIT_CONFIG_ERROR: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    telemetry::init(config.log_level());

    let cases = match select_cases(battery(), &cli.cases) {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    let mut reporter = Reporter::stdout();

    if let Some(Command::List) = cli.command {
        for case in &cases {
            reporter.line(format_args!("Case: {}", case.label()));
            reporter.request(case.messages());
            reporter.separator();
            reporter.line(format_args!(""));
        }
        reporter.flush();
        return ExitCode::SUCCESS;
    }

    let runner = match Runner::new(&config) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_CONFIG_ERROR);
        }
    };

    tracing::info!(
        endpoint = %config.endpoint(),
        model = %config.model(),
        timeout_seconds = config.timeout_seconds(),
        cases = cases.len(),
        "Starting role probe"
    );

    reporter.banner(config.model(), config.base_url());
    let summary = runner.run_battery(&cases, &mut reporter).await;
    reporter.footer(&summary);
    reporter.flush();

    tracing::info!(
        succeeded = summary.succeeded,
        transport_errors = summary.transport_errors,
        unexpected_errors = summary.unexpected_errors,
        "Role probe finished"
    );

    ExitCode::SUCCESS
}

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use club_cli::report::{format_report, format_report_json};
use club_cli::{Cli, Config, OutputFormat};
use club_core::{DayReport, parse_input, simulate_day};

/// Reads, validates and simulates one day from `path`.
fn run_day(path: &Path) -> Result<DayReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not open file {}", path.display()))?;
    let input = parse_input(&content)?;
    tracing::debug!(settings = ?input.settings, "starting simulation");
    let report = simulate_day(input.settings, input.events)?;
    Ok(report)
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let format = if cli.json { OutputFormat::Json } else { config.output };

    // Nothing is printed until the whole day has been simulated.
    let report = run_day(&cli.input)?;
    let output = match format {
        OutputFormat::Text => format_report(&report),
        OutputFormat::Json => format_report_json(&report)? + "\n",
    };
    std::io::stdout().lock().write_all(output.as_bytes())?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing with verbose flag support; stdout is reserved for the report
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

//! `gherkin-lite` binary: parse feature files and print what they contain.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;

use gherkin_lite_cli::config::{CliConfig, LogLevel, ReportFormat};
use gherkin_lite_cli::error::CliError;
use gherkin_lite_cli::logging::init_logging;
use gherkin_lite_cli::run::{Request, execute};

/// Parse Gherkin feature files and report features, scenarios, and expanded
/// Scenario Outlines.
#[derive(Parser, Debug)]
#[command(name = "gherkin-lite", version, about)]
struct Args {
    /// Feature files, or directories searched recursively for `.feature` files.
    #[arg(required = true)]
    paths: Vec<Utf8PathBuf>,

    /// Keep scenarios matching a tag expression, e.g. `@smoke&&~@slow`.
    #[arg(long)]
    tags: Option<String>,

    /// Keep scenarios at a line or inclusive line range, e.g. `12` or `10-20`.
    #[arg(long)]
    lines: Option<String>,

    /// Report format (text, json).
    #[arg(long)]
    format: Option<ReportFormat>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            let fallback = CliConfig::default();
            init_logging(&fallback);
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting gherkin-lite");

    let request = Request {
        paths: args.paths,
        tags: args.tags,
        lines: args.lines,
    };
    let mut stdout = io::stdout().lock();
    let result = execute(&request, &config, &mut stdout);
    let result = result.and_then(|summary| {
        stdout.flush()?;
        Ok(summary)
    });

    match result {
        Ok(summary) if summary.has_failures() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CliError>() {
            Some(CliError::Io(_)) | None => {
                tracing::error!(error = ?e, "run failed");
                ExitCode::from(1)
            }
            Some(_) => {
                tracing::error!(error = %e, "invalid invocation");
                ExitCode::from(2)
            }
        },
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.format))
}

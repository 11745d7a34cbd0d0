//! nodella - Node.js upgrade tester CLI tool
//!
//! Installs a target Node.js version, reinstalls dependencies, builds and
//! tests the project under it, then re-tests the original version.

use clap::Parser;
use nodella::cli::CliArgs;
use nodella::config::RunConfig;
use nodella::error::{AppError, FALLBACK_EXIT_CODE};
use nodella::logging::init_logging;
use nodella::orchestrator::Orchestrator;
use nodella::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    init_logging(args.log, !args.no_color);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!("Unexpected error: {:#}", e);
            let code = e
                .downcast_ref::<AppError>()
                .map_or(FALLBACK_EXIT_CODE, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::debug!("nodella v{}", env!("CARGO_PKG_VERSION"));

    let config = RunConfig::from_cli(&args).map_err(AppError::from)?;
    tracing::debug!(
        "Project: {} ({} via {})",
        config.project_dir.display(),
        config.package_manager,
        config.version_manager
    );

    let orchestrator = Orchestrator::new(config)?;
    let outcome = orchestrator.run().await?;

    let formatter = create_formatter(OutputConfig::from_cli(args.no_color));
    let mut stdout = io::stdout().lock();
    formatter.format(&outcome, &mut stdout)?;
    stdout.flush()?;

    Ok(ExitCode::from(outcome.exit_code()))
}

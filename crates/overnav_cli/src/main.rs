//! Overnav CLI - run headless navigation overlay scenarios
//!
//! ```text
//! overnav run scenarios/scroll_restore.json --report out/scroll.json
//! overnav suite --report-dir out
//! overnav routes
//! ```

mod config;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use overnav_headless::{run_builtin_suite, run_loaded_scenario, HeadlessScenario, RunOutcome};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::OvernavConfig;

/// Headless checks for the mobile navigation overlay
#[derive(Parser, Debug)]
#[command(name = "overnav")]
#[command(about = "Headless checks for the mobile navigation overlay")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./overnav.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scenario file
    Run {
        /// Scenario JSON file
        scenario: PathBuf,

        /// Write the JSON report to this (relative) path instead of stdout
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Override milliseconds per frame
        #[arg(long)]
        tick_ms: Option<u64>,
    },

    /// Run the built-in scenarios on every site route
    Suite {
        /// Directory for per-scenario JSON reports
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// List known routes
    Routes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = OvernavConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            scenario,
            report,
            tick_ms,
        } => cmd_run(&config, &scenario, report.as_deref(), tick_ms),
        Commands::Suite { report_dir } => {
            let dir = report_dir.or_else(|| config.headless.report_dir.clone().map(PathBuf::from));
            cmd_suite(&config, dir.as_deref())
        }
        Commands::Routes => {
            for path in config.run_settings().routes.paths() {
                println!("{path}");
            }
            Ok(())
        }
    }
}

fn cmd_run(
    config: &OvernavConfig,
    scenario_path: &Path,
    report_path: Option<&Path>,
    tick_ms: Option<u64>,
) -> Result<()> {
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    let mut settings = config.run_settings();
    if let Some(tick_ms) = tick_ms {
        settings.runtime.tick_ms = tick_ms;
    }

    info!("Running scenario {}", scenario.display_name());
    let outcome = run_loaded_scenario(&scenario, &settings)?;
    emit(&outcome, report_path)?;

    if outcome.is_failed() {
        bail!("scenario {} failed", scenario.display_name());
    }
    Ok(())
}

fn cmd_suite(config: &OvernavConfig, report_dir: Option<&Path>) -> Result<()> {
    let outcomes = run_builtin_suite(&config.run_settings())?;

    let mut failed = 0;
    for outcome in &outcomes {
        let report = outcome.report();
        let path = report_dir.map(|dir| dir.join(format!("{}.json", report.scenario)));
        emit(outcome, path.as_deref())?;
        if outcome.is_failed() {
            failed += 1;
            error!(
                "{}: step {:?} {}",
                report.scenario,
                report.failed_step_index,
                report.message.as_deref().unwrap_or("")
            );
        } else {
            info!("{}: passed", report.scenario);
        }
    }

    if failed > 0 {
        bail!("{failed} of {} scenarios failed", outcomes.len());
    }
    Ok(())
}

fn emit(outcome: &RunOutcome, path: Option<&Path>) -> Result<()> {
    let report = outcome.report();
    match path {
        Some(path) => {
            report.write_to_path(path)?;
            info!("Report written to {}", path.display());
            Ok(())
        }
        None => report.write_to_writer(&mut io::stdout().lock()),
    }
}

//! tidyshape CLI - reshape the wide datasets into tidy CSV
//!
//! ```bash
//! tidyshape                          # data/*_wide.csv → processed_data/*_tidy.csv
//! tidyshape --base-dir ./covid       # use ./covid/data and ./covid/processed_data
//! tidyshape --no-samples --report run.json
//! ```
//!
//! Per-file failures are printed and skipped; the exit status is non-zero
//! only when the directories or the report cannot be written.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tidyshape::logs::{log_info, CONSOLE};
use tidyshape::{run, ProcessError, RunConfig};

#[derive(Parser)]
#[command(name = "tidyshape")]
#[command(about = "Reshape wide period tables into tidy CSV", long_about = None)]
struct Cli {
    /// Base directory holding data/ and processed_data/ (default: program directory)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Input directory (overrides the base layout)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output directory (overrides the base layout)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Do not create placeholder data for missing inputs
    #[arg(long)]
    no_samples: bool,

    /// Write a JSON run report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Suppress status lines
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    CONSOLE.set_quiet(cli.quiet);

    if let Err(e) = execute(cli) {
        eprintln!("✗ Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&cli);
    let report = run(&config)?;

    if let Some(path) = cli.report.as_deref() {
        write_report(&report.to_json()?, path)?;
    }

    log_info(format!("\nData ready in: {}", report.output_dir.display()));
    Ok(())
}

fn build_config(cli: &Cli) -> RunConfig {
    let mut config = match &cli.base_dir {
        Some(base) => RunConfig::with_base_dir(base),
        None => RunConfig::from_env(),
    };

    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_dir(dir);
    }

    config
        .with_samples(!cli.no_samples)
        .with_delimiter(cli.delimiter)
}

fn write_report(json: &str, path: &Path) -> Result<(), ProcessError> {
    fs::write(path, json)
        .map_err(|e| ProcessError::Report(format!("{}: {}", path.display(), e)))?;
    log_info(format!("Report written to: {}", path.display()));
    Ok(())
}

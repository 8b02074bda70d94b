//! Batch driver: load or create inputs, melt each file, write tidy outputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use tidyshape::{run, RunConfig};
//!
//! let report = run(&RunConfig::from_env())?;
//! println!("{} saved, {} failed", report.succeeded(), report.failed());
//! ```
//!
//! A failing file is reported and skipped; it never stops the remaining files.

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::melt::melt;
use super::naming::{derive_label, tidy_file_name};
use crate::config::RunConfig;
use crate::error::{ProcessError, ProcessResult};
use crate::logs::{log_error, log_info, log_info_indent, log_success, log_warning};
use crate::parser::parse_wide_file;
use crate::samples::ensure_samples;
use crate::writer::write_tidy_file;

/// Result of processing one file successfully
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Input file name
    pub file: String,
    /// Where the tidy table was written
    pub output: PathBuf,
    /// Name of the value column
    pub label: String,
    /// Rows in the wide input
    pub source_rows: usize,
    /// Period columns melted from the wide input
    pub period_columns: usize,
    /// Rows written to the tidy output
    pub tidy_rows: usize,
}

/// Outcome of one file within a run
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FileOutcome {
    Saved(FileReport),
    Failed { file: String, error: String },
}

impl FileOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, FileOutcome::Saved(_))
    }

    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Saved(report) => &report.file,
            FileOutcome::Failed { file, .. } => file,
        }
    }
}

/// Summary of a whole batch run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Placeholder files written before processing
    pub samples_created: Vec<String>,
    /// One outcome per configured file, in order
    pub outcomes: Vec<FileOutcome>,
    pub output_dir: PathBuf,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Melt a single wide file into `output_dir`.
///
/// The value label comes from the input's file name and the output name
/// swaps its first `wide` for `tidy`.
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    delimiter: Option<char>,
) -> ProcessResult<FileReport> {
    let file = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let parsed = parse_wide_file(input, delimiter)?;
    debug!(
        "{}: {} rows, {} columns, encoding {}",
        file,
        parsed.table.row_count(),
        parsed.table.headers.len(),
        parsed.encoding
    );

    let label = derive_label(&file);
    let tidy = melt(&parsed.table, &label)?;

    let output = output_dir.join(tidy_file_name(&file));
    write_tidy_file(&tidy, &output)?;

    Ok(FileReport {
        file,
        output,
        label,
        source_rows: parsed.table.row_count(),
        // melt succeeded, so both identifier columns are present
        period_columns: parsed.table.headers.len() - 2,
        tidy_rows: tidy.row_count(),
    })
}

/// Run the full create → process → report cycle.
///
/// Only directory setup can fail the run; per-file errors land in the report.
pub fn run(config: &RunConfig) -> ProcessResult<RunReport> {
    let started_at = Utc::now();
    log_info("Processing data...");

    for dir in [&config.data_dir, &config.output_dir] {
        fs::create_dir_all(dir).map_err(|source| ProcessError::Setup {
            path: dir.clone(),
            source,
        })?;
    }

    let samples_created = if config.create_samples {
        let created =
            ensure_samples(&config.data_dir, &config.files).map_err(|source| {
                ProcessError::Setup {
                    path: config.data_dir.clone(),
                    source,
                }
            })?;
        for name in &created {
            log_info(format!("Creating sample {}", name));
        }
        created
    } else {
        Vec::new()
    };

    let mut outcomes = Vec::with_capacity(config.files.len());
    for file in &config.files {
        let input = config.data_dir.join(file);
        if !input.exists() {
            log_warning(format!("{} not found in {}", file, config.data_dir.display()));
        }

        let outcome = match process_file(&input, &config.output_dir, config.delimiter) {
            Ok(report) => {
                log_success(format!("Saved {}", tidy_file_name(file)));
                log_info_indent(
                    format!("{} rows → {} rows ({})", report.source_rows, report.tidy_rows, report.label),
                    1,
                );
                FileOutcome::Saved(report)
            }
            Err(e) => {
                log_error(format!("Error processing {}: {}", file, e));
                FileOutcome::Failed {
                    file: file.clone(),
                    error: e.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(RunReport {
        started_at,
        finished_at: Utc::now(),
        samples_created,
        outcomes,
        output_dir: config.output_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::placeholder;
    use tempfile::tempdir;

    fn config_in(base: &Path) -> RunConfig {
        RunConfig::with_base_dir(base)
    }

    #[test]
    fn test_full_run_creates_and_processes_samples() {
        let base = tempdir().unwrap();
        let config = config_in(base.path());

        let report = run(&config).unwrap();

        assert_eq!(report.samples_created.len(), 3);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 0);

        let out = fs::read_to_string(config.output_dir.join("vaccinations_tidy.csv")).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + 15);
        assert_eq!(lines[0], "Country,Population,Month_Year,vaccination");
        assert_eq!(lines[1], "United States,331000000,Jan_2021,12.5");
        assert_eq!(lines[6], "United Kingdom,67200000,Jan_2021,15.8");
    }

    #[test]
    fn test_labels_and_names_from_files() {
        let base = tempdir().unwrap();
        let config = config_in(base.path());
        run(&config).unwrap();

        let cases = fs::read_to_string(config.output_dir.join("cases_tidy.csv")).unwrap();
        assert!(cases.starts_with("Country,Population,Month_Year,case\n"));
        assert!(cases.contains("\nUnited States,331000000,Jan_2021,25000000\n"));

        let mortality = fs::read_to_string(config.output_dir.join("mortality_tidy.csv")).unwrap();
        assert!(mortality.starts_with("Country,Population,Month_Year,mortalit\n"));
    }

    #[test]
    fn test_missing_input_gets_placeholder() {
        let base = tempdir().unwrap();
        let config = config_in(base.path());
        let path = config.data_dir.join("cases_wide.csv");
        assert!(!path.exists());

        run(&config).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            placeholder("cases_wide.csv").unwrap()
        );
    }

    #[test]
    fn test_malformed_file_does_not_stop_run() {
        let base = tempdir().unwrap();
        let config = config_in(base.path());
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(
            config.data_dir.join("cases_wide.csv"),
            "Country,Jan_2021,Population\nUnited States,1,2,3,4\n",
        )
        .unwrap();

        let report = run(&config).unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        match &report.outcomes[1] {
            FileOutcome::Failed { file, error } => {
                assert_eq!(file, "cases_wide.csv");
                assert!(error.contains("Expected 3 fields"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(config.output_dir.join("vaccinations_tidy.csv").exists());
        assert!(config.output_dir.join("mortality_tidy.csv").exists());
        assert!(!config.output_dir.join("cases_tidy.csv").exists());
    }

    #[test]
    fn test_schema_error_reported() {
        let base = tempdir().unwrap();
        let config = config_in(base.path()).with_files(["cases_wide.csv"]);
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(config.data_dir.join("cases_wide.csv"), "Country,Jan_2021\nX,1").unwrap();

        let report = run(&config).unwrap();

        assert_eq!(report.failed(), 1);
        assert!(matches!(
            &report.outcomes[0],
            FileOutcome::Failed { error, .. } if error.contains("Population")
        ));
    }

    #[test]
    fn test_no_samples_reports_missing_file() {
        let base = tempdir().unwrap();
        let config = config_in(base.path()).with_samples(false);

        let report = run(&config).unwrap();

        assert!(report.samples_created.is_empty());
        assert_eq!(report.failed(), 3);
        assert!(!config.data_dir.join("cases_wide.csv").exists());
    }

    #[test]
    fn test_existing_input_is_used() {
        let base = tempdir().unwrap();
        let config = config_in(base.path()).with_files(["cases_wide.csv"]);
        fs::create_dir_all(&config.data_dir).unwrap();
        fs::write(
            config.data_dir.join("cases_wide.csv"),
            "Country,Q1,Q2,Population\nFrance,1,2,67000000\n",
        )
        .unwrap();

        let report = run(&config).unwrap();

        assert!(report.samples_created.is_empty());
        let out = fs::read_to_string(config.output_dir.join("cases_tidy.csv")).unwrap();
        assert_eq!(
            out,
            "Country,Population,Month_Year,case\nFrance,67000000,Q1,1\nFrance,67000000,Q2,2\n"
        );
    }

    #[test]
    fn test_process_file_report() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("vaccinations_wide.csv");
        fs::write(&input, placeholder("vaccinations_wide.csv").unwrap()).unwrap();

        let report = process_file(&input, dir.path(), None).unwrap();

        assert_eq!(report.label, "vaccination");
        assert_eq!(report.source_rows, 3);
        assert_eq!(report.period_columns, 5);
        assert_eq!(report.tidy_rows, 15);
        assert_eq!(report.output, dir.path().join("vaccinations_tidy.csv"));
    }

    #[test]
    fn test_accented_country_names_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cases_wide.csv");
        fs::write(
            &input,
            "Country,Jan_2021,Population\nCôte d'Ivoire,1.5,26000000\nTürkiye,2.5,84000000\n",
        )
        .unwrap();

        let report = process_file(&input, dir.path(), None).unwrap();
        let out = fs::read_to_string(&report.output).unwrap();

        assert_eq!(
            out,
            "Country,Population,Month_Year,case\n\
             Côte d'Ivoire,26000000,Jan_2021,1.5\n\
             Türkiye,84000000,Jan_2021,2.5\n"
        );
    }

    #[test]
    fn test_report_json() {
        let base = tempdir().unwrap();
        let report = run(&config_in(base.path()).with_files(["cases_wide.csv"])).unwrap();

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["outcomes"][0]["status"], "saved");
        assert_eq!(json["outcomes"][0]["label"], "case");
        assert_eq!(json["outcomes"][0]["period_columns"], 5);
        assert_eq!(json["samples_created"][0], "cases_wide.csv");
    }
}

//! Error types for the tidyshape reshaping pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - Reading and parsing wide CSV input
//! - [`ReshapeError`] - Melt failures (missing identifier columns, bad labels)
//! - [`WriteError`] - Serializing tidy output
//! - [`ProcessError`] - Top-level per-file and run errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors while reading a wide CSV table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode the raw bytes.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Malformed CSV content.
    #[error("Line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => CsvError::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => CsvError::Parse {
                line,
                message: format!("Expected {} fields, saw {}", expected_len, len),
            },
            csv::ErrorKind::Utf8 { err, .. } => CsvError::Encoding(err.to_string()),
            other => CsvError::Parse {
                line,
                message: format!("{:?}", other),
            },
        }
    }
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors raised by the melt operation.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// A declared identifier column is absent from the source table.
    #[error("Missing identifier column: {0}")]
    MissingColumn(String),

    /// The value label would shadow one of the fixed output columns.
    #[error("Value label '{0}' collides with an existing output column")]
    LabelCollision(String),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing a tidy table.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output path unwritable.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("Failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Process Errors (top-level)
// =============================================================================

/// Top-level errors for processing a file or preparing a run.
///
/// Per-file variants are caught by [`crate::transform::pipeline::run`]
/// and reported; only [`ProcessError::Setup`] escapes a run.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// CSV reading error.
    #[error("{0}")]
    Csv(#[from] CsvError),

    /// Reshape error.
    #[error("{0}")]
    Reshape(#[from] ReshapeError),

    /// Output error.
    #[error("{0}")]
    Write(#[from] WriteError),

    /// A working directory could not be prepared.
    #[error("Cannot prepare directory '{}': {source}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run report could not be saved.
    #[error("Cannot write report: {0}")]
    Report(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV reading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for melt operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for output operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> ProcessError
        let csv_err = CsvError::EmptyFile;
        let process_err: ProcessError = csv_err.into();
        assert!(process_err.to_string().contains("empty"));

        // ReshapeError -> ProcessError
        let reshape_err = ReshapeError::MissingColumn("Population".into());
        let process_err: ProcessError = reshape_err.into();
        assert!(process_err.to_string().contains("Population"));
    }

    #[test]
    fn test_unequal_lengths_become_parse_error() {
        let data = "a,b\n1,2\n3,4,5\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("third row should fail");

        match CsvError::from(err) {
            CsvError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("Expected 2 fields, saw 3"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_setup_error_format() {
        let err = ProcessError::Setup {
            path: PathBuf::from("/nope/data"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/data"));
        assert!(msg.contains("denied"));
    }
}

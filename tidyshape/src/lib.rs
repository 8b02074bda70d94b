//! # tidyshape - wide period tables to tidy CSV
//!
//! tidyshape reads CSV tables with one column per period (`Jan_2021`,
//! `Feb_2021`, ...) keyed by `Country` and `Population`, and writes them
//! back in long format, one row per observation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  wide CSV   │────▶│   Parser    │────▶│    Melt     │────▶│  tidy CSV   │
//! │  (data/)    │     │  (auto-enc) │     │  (unpivot)  │     │ (processed) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tidyshape::{run, RunConfig};
//!
//! let report = run(&RunConfig::default())?;
//! println!("Saved {} files", report.succeeded());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Wide and tidy tables, typed cells
//! - [`parser`] - CSV reading with auto-detection
//! - [`transform`] - Melt, naming policy, batch pipeline
//! - [`writer`] - Tidy CSV output
//! - [`samples`] - Placeholder datasets
//! - [`config`] - Directory layout and overrides
//! - [`logs`] - Console status lines

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input / output
pub mod parser;
pub mod samples;
pub mod writer;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{CsvError, ProcessError, ReshapeError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CellValue, ColumnKind, TidyRow, TidyTable, WideTable};

// =============================================================================
// Re-exports - Parsing and output
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_wide_file,
    parse_wide_str, ParseResult,
};
pub use writer::{tidy_to_string, write_tidy, write_tidy_file};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    derive_label, melt, process_file, run, tidy_file_name, FileOutcome, FileReport, RunReport,
};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::RunConfig;
pub use samples::ensure_samples;

//! Transformation module.
//!
//! - Melt: wide table to tidy table
//! - Naming: value label and output file name from the input name
//! - Pipeline: per-file processing and the batch driver

pub mod melt;
pub mod naming;
pub mod pipeline;

pub use melt::melt;
pub use naming::{derive_label, tidy_file_name};
pub use pipeline::*;

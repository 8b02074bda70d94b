//! Run configuration.
//!
//! By default everything lives next to the running executable:
//!
//! ```text
//! <program dir>/data/             wide inputs (placeholders created here)
//! <program dir>/processed_data/   tidy outputs
//! ```
//!
//! Environment variables (a `.env` file is honored) and CLI flags can move
//! either directory. Column names are not configurable.

use std::env;
use std::path::{Path, PathBuf};

/// Input directory name under the base directory.
pub const DATA_DIR_NAME: &str = "data";

/// Output directory name under the base directory.
pub const OUTPUT_DIR_NAME: &str = "processed_data";

/// The fixed set of wide inputs, processed in this order.
pub const DEFAULT_FILES: [&str; 3] = [
    "vaccinations_wide.csv",
    "cases_wide.csv",
    "mortality_wide.csv",
];

/// Overrides the base directory.
pub const ENV_BASE_DIR: &str = "TIDYSHAPE_BASE_DIR";

/// Overrides the input directory.
pub const ENV_DATA_DIR: &str = "TIDYSHAPE_DATA_DIR";

/// Overrides the output directory.
pub const ENV_OUTPUT_DIR: &str = "TIDYSHAPE_OUTPUT_DIR";

/// Settings for one batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the wide inputs
    pub data_dir: PathBuf,
    /// Directory receiving the tidy outputs
    pub output_dir: PathBuf,
    /// Input file names, relative to `data_dir`
    pub files: Vec<String>,
    /// Write placeholder data for missing inputs
    pub create_samples: bool,
    /// Force a delimiter instead of detecting it
    pub delimiter: Option<char>,
}

impl RunConfig {
    /// Standard layout under `base`.
    pub fn with_base_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            data_dir: base.join(DATA_DIR_NAME),
            output_dir: base.join(OUTPUT_DIR_NAME),
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            create_samples: true,
            delimiter: None,
        }
    }

    /// Build from the process environment, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base = non_empty(ENV_BASE_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(program_dir);
        let mut config = Self::with_base_dir(base);

        if let Some(dir) = non_empty(ENV_DATA_DIR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = non_empty(ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_files<S: Into<String>>(mut self, files: impl IntoIterator<Item = S>) -> Self {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_samples(mut self, create: bool) -> Self {
        self.create_samples = create;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::with_base_dir(program_dir())
    }
}

/// Directory containing the running executable, or `.` if unknown.
pub fn program_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

//! Pipeline configuration.
//!
//! Defaults reproduce the reference deployment (fixed relative paths, comma delimiter). A JSON
//! file can override any subset of fields:
//!
//! ```json
//! {
//!   "input_path": "Data/Raw/sales_data_raw.csv",
//!   "output_path": "Data/processed/sales_data_clean.csv",
//!   "delimiter": ";",
//!   "preview_rows": 10
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CleaningError, CleaningResult};
use crate::ingestion::{DEFAULT_NA_VALUES, LoadOptions};

/// Default location of the raw input file.
pub const DEFAULT_INPUT_PATH: &str = "Data/Raw/sales_data_raw.csv";
/// Default location of the cleaned output file.
pub const DEFAULT_OUTPUT_PATH: &str = "Data/processed/sales_data_clean.csv";
/// Default number of rows printed after a run.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Everything a [`crate::pipeline::Pipeline`] run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Delimited file to load.
    pub input_path: PathBuf,
    /// Where the cleaned table is written. The parent directory must exist.
    pub output_path: PathBuf,
    /// Field delimiter, used for both reading and writing. Must be a single ASCII character.
    pub delimiter: char,
    /// Raw cell contents treated as missing on load.
    pub na_values: Vec<String>,
    /// Rows shown by the binary after a successful run.
    pub preview_rows: usize,
    /// If set, a JSON [`crate::report::CleaningReport`] is written here after the output file.
    pub report_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            delimiter: ',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            report_path: None,
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file. Missing fields take their defaults; unknown fields are rejected.
    pub fn from_json_path(path: impl AsRef<Path>) -> CleaningResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse a JSON config document.
    pub fn from_json_str(input: &str) -> CleaningResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// The delimiter as the single byte the CSV reader/writer expects.
    pub fn delimiter_byte(&self) -> CleaningResult<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r')
            .ok_or_else(|| CleaningError::Config {
                message: format!(
                    "delimiter must be a single ASCII character other than quote or newline, got {:?}",
                    self.delimiter
                ),
            })
    }

    /// Loader options derived from this config.
    pub fn load_options(&self) -> CleaningResult<LoadOptions> {
        Ok(LoadOptions {
            delimiter: self.delimiter_byte()?,
            na_values: self.na_values.clone(),
        })
    }
}

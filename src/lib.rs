//! `sales-data-cleaning` loads a raw sales table from a delimited text file into an in-memory
//! [`types::DataSet`], cleans it, and writes the cleaned table back out.
//!
//! The primary entrypoint is [`pipeline::Pipeline`], configured by a [`config::PipelineConfig`]
//! whose defaults read `Data/Raw/sales_data_raw.csv` and write
//! `Data/processed/sales_data_clean.csv`.
//!
//! ## Cleaning stages
//!
//! Control flows strictly forward; each stage returns a new [`types::DataSet`]:
//!
//! 1. **Load** ([`ingestion`]): header row → column names, column types inferred from the data,
//!    empty cells and NA tokens → [`types::Value::Null`]
//! 2. **Normalize columns** ([`cleaning::normalize_column_names`]): trim + lowercase names;
//!    two columns normalizing to the same name is an error
//! 3. **Trim text** ([`cleaning::trim_text_cells`]): trim every cell of every text column,
//!    re-read trimmed NA tokens as missing, and re-infer text column types
//! 4. **Sanitize rows** ([`cleaning::sanitize_rows`]): drop rows with any missing value, coerce
//!    `price` to a float (failures → missing) and `qty` to an integer (failures → 0), drop rows
//!    with a missing or negative `price` or a negative `qty`
//! 5. **Write** ([`output`]): header + rows, no index column, same delimiter as the input
//!
//! Bad cell data never raises an error; such rows are dropped and only counted (see
//! [`report::CleaningReport`]). Missing input files, malformed CSV, missing `price`/`qty`
//! columns, and unwritable output paths are fatal [`CleaningError`]s.
//!
//! ## Quick example: clean a file
//!
//! ```no_run
//! use sales_data_cleaning::config::PipelineConfig;
//! use sales_data_cleaning::pipeline::Pipeline;
//! use sales_data_cleaning::preview::Preview;
//!
//! # fn main() -> Result<(), sales_data_cleaning::CleaningError> {
//! let config = PipelineConfig {
//!     input_path: "sales.csv".into(),
//!     output_path: "sales_clean.csv".into(),
//!     ..Default::default()
//! };
//! let run = Pipeline::new(config).run()?;
//! println!("{}", Preview::new(&run.dataset, 5));
//! # Ok(())
//! # }
//! ```
//!
//! ## Quick example: clean in memory
//!
//! ```rust
//! use sales_data_cleaning::cleaning::clean;
//! use sales_data_cleaning::ingestion::{load_csv_from_reader, LoadOptions};
//!
//! let input = " Product ,Price,QTY\n pen , 10.5 ,3\nink,abc,2\npad,-5,1\ncap,7,-2\n";
//! let mut rdr = csv::Reader::from_reader(input.as_bytes());
//! let raw = load_csv_from_reader(&mut rdr, &LoadOptions::default()).unwrap();
//!
//! let cleaned = clean(&raw).unwrap();
//! assert_eq!(cleaned.row_count(), 1);
//! assert_eq!(cleaned.schema.field_names().collect::<Vec<_>>(), vec!["product", "price", "qty"]);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: delimited file → [`types::DataSet`]
//! - [`cleaning`]: the in-memory stages
//! - [`output`]: [`types::DataSet`] → delimited file
//! - [`pipeline`]: load → clean → write, with observer hooks
//! - [`config`]: paths and options, with JSON loading
//! - [`report`]: per-stage row counts
//! - [`preview`]: text rendering of the first rows
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: the shared error type

pub mod cleaning;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod report;
pub mod types;

pub use error::{CleaningError, CleaningResult};

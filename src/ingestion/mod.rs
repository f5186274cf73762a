//! Loading delimited files into an in-memory [`crate::types::DataSet`].
//!
//! Most callers go through [`crate::pipeline::Pipeline`], which loads, cleans, and writes in one
//! call. The loader is also usable on its own:
//!
//! - [`load_csv_from_path`] opens a file and infers column types
//! - [`load_csv_from_reader`] does the same for any configured [`::csv::Reader`]

pub mod csv;

pub use self::csv::{DEFAULT_NA_VALUES, LoadOptions, infer_column_type, load_csv_from_path, load_csv_from_reader};

//! Serializing a [`crate::types::DataSet`] back to delimited text.

pub mod csv;

pub use self::csv::{write_csv_to_path, write_csv_to_writer};

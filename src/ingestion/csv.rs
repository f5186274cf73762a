//! CSV loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CleaningError, CleaningResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell contents treated as missing by default (in addition to the empty field).
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Options controlling how a delimited file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte (`b','` by default).
    pub delimiter: u8,
    /// Raw cell contents that load as [`Value::Null`]. Matching is exact (no trimming).
    pub na_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LoadOptions {
    fn is_missing(&self, raw: &str) -> bool {
        raw.is_empty() || self.na_values.iter().any(|na| na == raw)
    }
}

/// Load a delimited file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first row is the header; column names are kept verbatim.
/// - Every record must have as many fields as the header.
/// - Column types are inferred from the data (see [`infer_column_type`]).
/// - Empty fields and NA tokens load as [`Value::Null`].
///
/// A missing file surfaces as [`CleaningError::Io`]; a structurally malformed file as
/// [`CleaningError::Csv`].
pub fn load_csv_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> CleaningResult<DataSet> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(file);
    load_csv_from_reader(&mut rdr, options)
}

/// Load CSV data from an existing CSV reader.
///
/// The reader's own delimiter/header settings are used as-is; only `options.na_values` applies.
pub fn load_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    options: &LoadOptions,
) -> CleaningResult<DataSet> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(CleaningError::SchemaMismatch {
            message: "input has no header row".to_string(),
        });
    }

    // Keep raw text until every row is read: a column's type depends on all of its cells.
    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        raw_rows.push(
            record
                .iter()
                .map(|raw| (!options.is_missing(raw)).then(|| raw.to_owned()))
                .collect(),
        );
    }

    let fields: Vec<Field> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells = raw_rows
                .iter()
                .filter_map(|row| row.get(idx).and_then(|cell| cell.as_deref()));
            Field::new(name, infer_column_type(cells))
        })
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|raw_row| {
            raw_row
                .into_iter()
                .zip(&fields)
                .map(|(cell, field)| match cell {
                    Some(raw) => parse_typed_value(raw, field.data_type),
                    None => Value::Null,
                })
                .collect()
        })
        .collect();

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Infer a column type from its non-missing raw cells.
///
/// - every cell parses as `i64` → [`DataType::Int64`]
/// - else every cell parses as a (non-NaN) `f64` → [`DataType::Float64`]
/// - else every cell is `True`/`true`/`TRUE`/`False`/`false`/`FALSE` → [`DataType::Bool`]
/// - otherwise, or when there are no cells at all → [`DataType::Utf8`]
///
/// Cells are not trimmed first, so `" 10.5 "` makes a column text until the trimming stage
/// re-infers it.
pub fn infer_column_type<'a>(cells: impl IntoIterator<Item = &'a str>) -> DataType {
    let mut seen = false;
    let (mut int, mut float, mut boolean) = (true, true, true);

    for cell in cells {
        seen = true;
        int = int && cell.parse::<i64>().is_ok();
        float = float && parse_float(cell).is_some();
        boolean = boolean && parse_bool(cell).is_some();
        if !(int || float || boolean) {
            return DataType::Utf8;
        }
    }

    match (seen, int, float, boolean) {
        (false, ..) => DataType::Utf8,
        (true, true, ..) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

pub(crate) fn parse_typed_value(raw: String, data_type: DataType) -> Value {
    // Inference guarantees these parses succeed; fall back to text rather than lose the cell.
    let parsed = match data_type {
        DataType::Int64 => raw.parse::<i64>().ok().map(Value::Int64),
        DataType::Float64 => parse_float(&raw).map(Value::Float64),
        DataType::Bool => parse_bool(&raw).map(Value::Bool),
        DataType::Utf8 => None,
    };
    parsed.unwrap_or(Value::Utf8(raw))
}

fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

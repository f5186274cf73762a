//! In-memory cleaning stages.
//!
//! Each stage is a function from `&DataSet` to a new [`DataSet`]; inputs are never mutated.
//! [`clean`] runs them in order:
//!
//! 1. [`normalize_column_names`]: trim + lowercase column names, fail on collisions
//! 2. [`trim_text_cells`] + [`retype_text_columns`]: trim text cells, then re-infer text
//!    column types from the trimmed cells
//! 3. [`sanitize_rows`] sub-steps: drop missing, coerce `price`/`qty`, drop invalid rows
//!
//! ## Example
//!
//! ```rust
//! use sales_data_cleaning::cleaning::clean;
//! use sales_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new(" Price ", DataType::Utf8),
//!     Field::new("QTY", DataType::Int64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Utf8(" 10.5 ".to_string()), Value::Int64(3)],
//!         vec![Value::Utf8("abc".to_string()), Value::Int64(2)],
//!         vec![Value::Utf8("-5".to_string()), Value::Int64(1)],
//!     ],
//! );
//!
//! let cleaned = clean(&ds).unwrap();
//! assert_eq!(cleaned.schema.field_names().collect::<Vec<_>>(), vec!["price", "qty"]);
//! assert_eq!(cleaned.rows, vec![vec![Value::Float64(10.5), Value::Int64(3)]]);
//! ```

pub mod columns;
pub mod sanitize;
pub mod trim;

pub use columns::{normalize_column_name, normalize_column_names};
pub use sanitize::{
    PRICE_COLUMN, QTY_COLUMN, coerce_numeric_columns, coerce_price, coerce_qty, drop_missing_price,
    drop_missing_rows, drop_negative_price, drop_negative_qty, sanitize_rows,
};
pub use trim::{retype_text_columns, trim_text_cells};

use crate::error::CleaningResult;
use crate::ingestion::DEFAULT_NA_VALUES;
use crate::report::{Stage, StageStats};
use crate::types::DataSet;

/// Run every cleaning stage in order, treating [`DEFAULT_NA_VALUES`] as missing.
pub fn clean(dataset: &DataSet) -> CleaningResult<DataSet> {
    clean_observed(dataset, DEFAULT_NA_VALUES, |_| {})
}

/// Run every cleaning stage in order, reporting row counts after each one to `on_stage`.
///
/// `na_values` should be the list the data was loaded with; trimmed text matching one of them
/// becomes missing. Stages that fail report nothing; the error is returned immediately.
pub fn clean_observed<S, F>(
    dataset: &DataSet,
    na_values: &[S],
    mut on_stage: F,
) -> CleaningResult<DataSet>
where
    S: AsRef<str>,
    F: FnMut(StageStats),
{
    let mut record = |stage: Stage, before: &DataSet, after: &DataSet| {
        on_stage(StageStats {
            stage,
            rows_in: before.row_count(),
            rows_out: after.row_count(),
        })
    };

    let normalized = normalize_column_names(dataset)?;
    record(Stage::NormalizeColumns, dataset, &normalized);

    let trimmed = retype_text_columns(&trim_text_cells(&normalized, na_values));
    record(Stage::TrimText, &normalized, &trimmed);

    let complete = drop_missing_rows(&trimmed);
    record(Stage::DropMissing, &trimmed, &complete);

    let coerced = coerce_numeric_columns(&complete)?;
    record(Stage::CoerceNumeric, &complete, &coerced);

    let priced = drop_missing_price(&coerced)?;
    record(Stage::DropMissingPrice, &coerced, &priced);

    let non_negative_price = drop_negative_price(&priced)?;
    record(Stage::DropNegativePrice, &priced, &non_negative_price);

    let cleaned = drop_negative_qty(&non_negative_price)?;
    record(Stage::DropNegativeQty, &non_negative_price, &cleaned);

    Ok(cleaned)
}

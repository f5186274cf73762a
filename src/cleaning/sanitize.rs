//! Row-level validation: missing values and the `price`/`qty` contract.
//!
//! The sub-steps run in a fixed order, each returning a new [`DataSet`]:
//!
//! 1. [`drop_missing_rows`]: any `Null` anywhere drops the row
//! 2. [`coerce_numeric_columns`]: `price` → `Float64` (failures → `Null`), `qty` → `Int64`
//!    (failures → `0`)
//! 3. [`drop_missing_price`]: coercion failures on `price` drop the row
//! 4. [`drop_negative_price`], then [`drop_negative_qty`]
//!
//! None of these raise on bad cell data. Only a missing `price` or `qty` column is an error.

use crate::error::{CleaningError, CleaningResult};
use crate::types::{DataSet, DataType, Value};

/// Name of the unit price column (after normalization).
pub const PRICE_COLUMN: &str = "price";
/// Name of the quantity column (after normalization).
pub const QTY_COLUMN: &str = "qty";

/// Run every sanitizer sub-step in order.
pub fn sanitize_rows(dataset: &DataSet) -> CleaningResult<DataSet> {
    let coerced = coerce_numeric_columns(&drop_missing_rows(dataset))?;
    let priced = drop_missing_price(&coerced)?;
    drop_negative_qty(&drop_negative_price(&priced)?)
}

/// Drop every row holding a `Null` in any column.
pub fn drop_missing_rows(dataset: &DataSet) -> DataSet {
    dataset.filter_rows(|row| !row.iter().any(Value::is_null))
}

/// Coerce `price` to `Float64` and `qty` to `Int64`.
///
/// See [`coerce_price`] and [`coerce_qty`] for the per-cell rules. The schema is retyped
/// accordingly; no rows are removed.
pub fn coerce_numeric_columns(dataset: &DataSet) -> CleaningResult<DataSet> {
    let price_idx = require_column(dataset, PRICE_COLUMN)?;
    let qty_idx = require_column(dataset, QTY_COLUMN)?;

    let schema = dataset
        .schema
        .with_data_type(price_idx, DataType::Float64)
        .with_data_type(qty_idx, DataType::Int64);

    Ok(dataset.map_rows_with_schema(schema, |row| {
        let mut out = row.to_vec();
        out[price_idx] = coerce_price(&row[price_idx]);
        out[qty_idx] = coerce_qty(&row[qty_idx]);
        out
    }))
}

/// Best-effort conversion to a real number.
///
/// Numbers pass through, booleans become `1.0`/`0.0`, text is trimmed and parsed. Anything
/// else, including NaN, becomes `Null`.
pub fn coerce_price(value: &Value) -> Value {
    to_real(value).map(Value::Float64).unwrap_or(Value::Null)
}

/// Best-effort conversion to an integer quantity.
///
/// Values are read as real numbers like [`coerce_price`] and truncated toward zero. Values that
/// do not convert (or are not finite) become `0` rather than `Null`.
pub fn coerce_qty(value: &Value) -> Value {
    let qty = match value {
        Value::Int64(v) => Some(*v),
        Value::Utf8(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let qty = qty.or_else(|| {
        to_real(value)
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    });
    Value::Int64(qty.unwrap_or(0))
}

/// Drop rows whose `price` is `Null` (coercion failures).
pub fn drop_missing_price(dataset: &DataSet) -> CleaningResult<DataSet> {
    let idx = require_column(dataset, PRICE_COLUMN)?;
    Ok(dataset.filter_rows(|row| row.get(idx).is_some_and(|v| !v.is_null())))
}

/// Keep only rows whose `price` is a number `>= 0`.
pub fn drop_negative_price(dataset: &DataSet) -> CleaningResult<DataSet> {
    let idx = require_column(dataset, PRICE_COLUMN)?;
    Ok(dataset.filter_rows(|row| is_non_negative(row.get(idx))))
}

/// Keep only rows whose `qty` is a number `>= 0`.
pub fn drop_negative_qty(dataset: &DataSet) -> CleaningResult<DataSet> {
    let idx = require_column(dataset, QTY_COLUMN)?;
    Ok(dataset.filter_rows(|row| is_non_negative(row.get(idx))))
}

fn to_real(value: &Value) -> Option<f64> {
    let real = match value {
        Value::Null => None,
        Value::Int64(v) => Some(*v as f64),
        Value::Float64(v) => Some(*v),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Utf8(s) => s.trim().parse::<f64>().ok(),
    };
    real.filter(|v| !v.is_nan())
}

fn is_non_negative(value: Option<&Value>) -> bool {
    value.and_then(Value::as_f64).is_some_and(|v| v >= 0.0)
}

fn require_column(dataset: &DataSet, name: &str) -> CleaningResult<usize> {
    dataset
        .schema
        .index_of(name)
        .ok_or_else(|| CleaningError::SchemaMismatch {
            message: format!(
                "missing required column '{name}'. columns={:?}",
                dataset.schema.field_names().collect::<Vec<_>>()
            ),
        })
}

//! Whitespace trimming for text columns.

use crate::ingestion::csv::parse_typed_value;
use crate::ingestion::infer_column_type;
use crate::types::{DataSet, DataType, Value};

/// Returns a new [`DataSet`] with every cell of every [`DataType::Utf8`] column trimmed.
///
/// Numeric and boolean columns are untouched. `Null` stays `Null`. A text cell that trims to
/// the empty string, or to one of `na_values`, becomes `Null`: the loader would read the
/// written cell back as missing.
pub fn trim_text_cells<S: AsRef<str>>(dataset: &DataSet, na_values: &[S]) -> DataSet {
    let text_columns: Vec<bool> = dataset
        .schema
        .fields
        .iter()
        .map(|f| f.data_type == DataType::Utf8)
        .collect();

    dataset.map_rows(|row| {
        row.iter()
            .zip(&text_columns)
            .map(|(value, &is_text)| match value {
                Value::Utf8(s) if is_text => trim_text(s, na_values),
                other => other.clone(),
            })
            .collect()
    })
}

fn trim_text<S: AsRef<str>>(s: &str, na_values: &[S]) -> Value {
    match s.trim() {
        "" => Value::Null,
        trimmed if na_values.iter().any(|na| na.as_ref() == trimmed) => Value::Null,
        trimmed => Value::Utf8(trimmed.to_owned()),
    }
}

/// Re-infer the type of every [`DataType::Utf8`] column from its current cells.
///
/// Uses the loader's rules ([`infer_column_type`]), so a column that was text only because of
/// padding (`" 0.50 "`) becomes numeric once trimmed, exactly as the written file would load.
/// Columns that are still text, and every non-text column, are returned unchanged.
pub fn retype_text_columns(dataset: &DataSet) -> DataSet {
    let mut schema = dataset.schema.clone();
    let mut targets: Vec<Option<DataType>> = vec![None; dataset.column_count()];

    for (idx, field) in dataset.schema.fields.iter().enumerate() {
        if field.data_type != DataType::Utf8 {
            continue;
        }
        let cells = dataset.column(idx).filter_map(|value| match value {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        });
        let inferred = infer_column_type(cells);
        if inferred != DataType::Utf8 {
            schema = schema.with_data_type(idx, inferred);
            targets[idx] = Some(inferred);
        }
    }

    if targets.iter().all(Option::is_none) {
        return dataset.clone();
    }

    dataset.map_rows_with_schema(schema, |row| {
        row.iter()
            .zip(&targets)
            .map(|(value, target)| match (value, target) {
                (Value::Utf8(s), Some(data_type)) => parse_typed_value(s.clone(), *data_type),
                (other, _) => other.clone(),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::{retype_text_columns, trim_text_cells};
    use crate::ingestion::DEFAULT_NA_VALUES;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn text(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    fn mixed_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("product", DataType::Utf8),
            Field::new("price", DataType::Utf8),
            Field::new("qty", DataType::Int64),
            Field::new("paid", DataType::Bool),
        ]);
        let rows = vec![
            vec![text("  Widget "), text("  42.0  "), Value::Int64(3), Value::Bool(true)],
            vec![Value::Null, text("7"), Value::Int64(-1), Value::Bool(false)],
            vec![text("\tGadget\n"), text("   "), Value::Null, Value::Null],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn trims_text_cells_before_any_coercion() {
        let out = trim_text_cells(&mixed_dataset(), DEFAULT_NA_VALUES);
        assert_eq!(out.rows[0][0], text("Widget"));
        assert_eq!(out.rows[0][1], text("42.0"));
        assert_eq!(out.rows[2][0], text("Gadget"));
    }

    #[test]
    fn non_text_columns_and_nulls_are_unchanged() {
        let ds = mixed_dataset();
        let out = trim_text_cells(&ds, DEFAULT_NA_VALUES);
        assert_eq!(out.schema, ds.schema);
        for (before, after) in ds.rows.iter().zip(&out.rows) {
            assert_eq!(before[2], after[2]);
            assert_eq!(before[3], after[3]);
        }
        assert_eq!(out.rows[1][0], Value::Null);
    }

    #[test]
    fn whitespace_only_text_becomes_null() {
        let out = trim_text_cells(&mixed_dataset(), DEFAULT_NA_VALUES);
        assert_eq!(out.rows[2][1], Value::Null);
    }

    #[test]
    fn padded_na_tokens_become_null() {
        let schema = Schema::new(vec![Field::new("region", DataType::Utf8)]);
        let ds = DataSet::new(
            schema,
            vec![vec![text(" N/A ")], vec![text("\tnull")], vec![text("East")]],
        );

        let out = trim_text_cells(&ds, DEFAULT_NA_VALUES);
        assert_eq!(out.rows, vec![vec![Value::Null], vec![Value::Null], vec![text("East")]]);

        let custom = trim_text_cells(&ds, &["East"]);
        assert_eq!(custom.rows[0][0], text("N/A"));
        assert_eq!(custom.rows[2][0], Value::Null);
    }

    #[test]
    fn no_text_cell_keeps_surrounding_whitespace() {
        let out = trim_text_cells(&mixed_dataset(), DEFAULT_NA_VALUES);
        for row in &out.rows {
            for value in row {
                if let Value::Utf8(s) = value {
                    assert_eq!(s.as_str(), s.trim());
                    assert!(!s.is_empty());
                }
            }
        }
    }

    #[test]
    fn trimmed_numeric_text_is_retyped_like_the_loader_would() {
        let schema = Schema::new(vec![
            Field::new("product", DataType::Utf8),
            Field::new("discount", DataType::Utf8),
            Field::new("units", DataType::Utf8),
            Field::new("paid", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![text(" pen "), text(" 0.50 "), text("+3"), text(" True")],
                vec![text("pad"), text("+3"), Value::Null, text("false ")],
            ],
        );

        let out = retype_text_columns(&trim_text_cells(&ds, DEFAULT_NA_VALUES));
        let types: Vec<DataType> = out.schema.fields.iter().map(|f| f.data_type).collect();
        assert_eq!(
            types,
            vec![DataType::Utf8, DataType::Float64, DataType::Int64, DataType::Bool]
        );
        assert_eq!(
            out.rows,
            vec![
                vec![text("pen"), Value::Float64(0.5), Value::Int64(3), Value::Bool(true)],
                vec![text("pad"), Value::Float64(3.0), Value::Null, Value::Bool(false)],
            ]
        );
    }

    #[test]
    fn mixed_text_columns_stay_text() {
        let ds = trim_text_cells(&mixed_dataset(), DEFAULT_NA_VALUES);
        let mut with_word = ds.clone();
        with_word.rows[1][1] = text("seven");

        let out = retype_text_columns(&with_word);
        assert_eq!(out, with_word);
    }
}

//! Plain-text preview of the first rows of a [`DataSet`].

use std::fmt;

use crate::types::{DataSet, Value};

/// Renders the first `rows` rows of a dataset as a right-aligned text table.
///
/// ```rust
/// use sales_data_cleaning::preview::Preview;
/// use sales_data_cleaning::types::{DataSet, DataType, Field, Schema, Value};
///
/// let schema = Schema::new(vec![
///     Field::new("product", DataType::Utf8),
///     Field::new("qty", DataType::Int64),
/// ]);
/// let ds = DataSet::new(schema, vec![vec![Value::Utf8("pen".to_string()), Value::Int64(3)]]);
///
/// assert_eq!(Preview::new(&ds, 5).to_string(), "   product  qty\n0      pen    3");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    dataset: &'a DataSet,
    rows: usize,
}

impl<'a> Preview<'a> {
    /// Preview the first `rows` rows of `dataset` (all of them if it has fewer).
    pub fn new(dataset: &'a DataSet, rows: usize) -> Self {
        Self { dataset, rows }
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.dataset.schema.field_names().collect();

        if self.dataset.rows.is_empty() || self.rows == 0 {
            writeln!(f, "Empty DataSet")?;
            writeln!(f, "Columns: [{}]", names.join(", "))?;
            return write!(f, "Index: []");
        }

        let cells: Vec<Vec<String>> = self
            .dataset
            .rows
            .iter()
            .take(self.rows)
            .map(|row| row.iter().map(render_cell).collect())
            .collect();

        let index_width = (cells.len() - 1).to_string().len();
        let widths: Vec<usize> = names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_width$}", "")?;
        for (name, width) in names.iter().zip(&widths) {
            write!(f, "  {name:>width$}")?;
        }

        for (row_idx, row) in cells.iter().enumerate() {
            write!(f, "\n{row_idx:<index_width$}")?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {cell:>width$}")?;
            }
        }
        Ok(())
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

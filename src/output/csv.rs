//! CSV writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CleaningResult;
use crate::types::DataSet;

/// Write a [`DataSet`] to `path` as delimited text.
///
/// The header row holds the column names; there is no index column. Cells are rendered with
/// [`crate::types::Value`]'s `Display` (so `Null` is an empty field). The destination directory
/// must already exist; a missing or unwritable destination is a [`crate::CleaningError::Io`].
pub fn write_csv_to_path(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    delimiter: u8,
) -> CleaningResult<()> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(file);
    write_csv_to_writer(dataset, &mut wtr)
}

/// Write a [`DataSet`] through an existing CSV writer and flush it.
pub fn write_csv_to_writer<W: Write>(
    dataset: &DataSet,
    wtr: &mut csv::Writer<W>,
) -> CleaningResult<()> {
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|value| value.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_csv_to_writer;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn written(ds: &DataSet, delimiter: u8) -> String {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        write_csv_to_writer(ds, &mut wtr).unwrap();
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    fn cleaned() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("product", DataType::Utf8),
            Field::new("price", DataType::Float64),
            Field::new("qty", DataType::Int64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Utf8("pen, blue".to_string()), Value::Float64(7.0), Value::Int64(3)],
                vec![Value::Utf8("pad".to_string()), Value::Float64(10.25), Value::Int64(0)],
            ],
        )
    }

    #[test]
    fn writes_header_and_rows_without_index() {
        assert_eq!(
            written(&cleaned(), b','),
            "product,price,qty\n\"pen, blue\",7.0,3\npad,10.25,0\n"
        );
    }

    #[test]
    fn honours_delimiter() {
        assert_eq!(
            written(&cleaned(), b';'),
            "product;price;qty\npen, blue;7.0;3\npad;10.25;0\n"
        );
    }

    #[test]
    fn empty_dataset_writes_header_only() {
        let ds = cleaned().head(0);
        assert_eq!(written(&ds, b','), "product,price,qty\n");
    }
}

//! Column-name normalization.

use std::collections::HashSet;

use crate::error::{CleaningError, CleaningResult};
use crate::types::{DataSet, Field, Schema};

/// Trim surrounding whitespace and lowercase.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns a new [`DataSet`] with every column renamed by [`normalize_column_name`].
///
/// Row data and column types are unchanged. If two columns (including verbatim duplicate
/// headers) normalize to the same name, this fails with [`CleaningError::ColumnCollision`]
/// instead of letting one column shadow the other.
pub fn normalize_column_names(dataset: &DataSet) -> CleaningResult<DataSet> {
    let mut seen: HashSet<String> = HashSet::with_capacity(dataset.column_count());
    let mut fields = Vec::with_capacity(dataset.column_count());

    for field in &dataset.schema.fields {
        let name = normalize_column_name(&field.name);
        if !seen.insert(name.clone()) {
            let sources = dataset
                .schema
                .field_names()
                .filter(|original| normalize_column_name(original) == name)
                .map(str::to_owned)
                .collect();
            return Err(CleaningError::ColumnCollision { column: name, sources });
        }
        fields.push(Field::new(name, field.data_type));
    }

    Ok(DataSet::new(Schema::new(fields), dataset.rows.clone()))
}

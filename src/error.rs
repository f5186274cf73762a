use thiserror::Error;

/// Convenience result type for loading, cleaning, and writing.
pub type CleaningResult<T> = Result<T, CleaningError>;

/// Error type returned by the cleaning pipeline.
///
/// This is a single error enum shared by the loader, the cleaning stages, the writer, and
/// configuration handling. Per-cell data problems (non-numeric prices, missing fields) are never
/// reported through it; those rows are dropped instead.
#[derive(Debug, Error)]
pub enum CleaningError {
    /// Underlying I/O error (e.g. input file not found, output directory missing).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not validly delimited (inconsistent field counts, invalid UTF-8, ...).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Config file or report could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The table does not have the shape the pipeline needs (no header, missing `price`/`qty`).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Two or more columns normalize to the same name.
    #[error("column name collision: {sources:?} all normalize to '{column}'")]
    ColumnCollision { column: String, sources: Vec<String> },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

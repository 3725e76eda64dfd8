use thiserror::Error;

/// Convenience result type used across the crate.
pub type EdaResult<T> = Result<T, EdaError>;

/// Error type returned by loading and summary functions.
///
/// Missing-value resolution never fails; only the surfaces around it do.
#[derive(Debug, Error)]
pub enum EdaError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A summary was requested for a column that is not in the schema.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },
}

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur when reading or loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// A row does not carry the requested field.
    #[error("missing field \"{0}\"")]
    MissingField(String),

    /// A field holds a value of a different type than requested.
    #[error("field \"{field}\" is {found}, expected {expected}")]
    WrongType {
        /// The field name.
        field: String,
        /// The type the caller asked for.
        expected: &'static str,
        /// The type actually stored.
        found: &'static str,
    },

    /// A row index past the end of the dataset.
    #[error("row {index} out of range (dataset has {len} rows)")]
    RowOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of rows in the dataset.
        len: usize,
    },

    /// The source could not be parsed as a dataset.
    #[error("invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// The source file could not be read.
    #[error("cannot read dataset: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur in a storage sink
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the Arrow library during array operations
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Error from the Parquet library during file writing
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error serializing footer metadata
    #[error("Metadata error: {0}")]
    MetadataError(#[from] crate::metadata::MetadataError),

    /// A column name was re-declared with a different column kind
    #[error("column '{name}' already declared as a {existing} column")]
    KindMismatch {
        /// The colliding column name
        name: String,
        /// Kind of the column that already owns the name ("scalar" or "vector")
        existing: &'static str,
    },

    /// A handle did not refer to any declared column
    #[error("unknown column handle {0}")]
    UnknownColumn(usize),

    /// A row was committed while some column did not hold exactly one value
    /// for it
    #[error("column '{name}' has {len} values at commit of row {expected}")]
    RowLengthMismatch {
        /// The misaligned column
        name: String,
        /// Its actual length
        len: usize,
        /// The length every column must have after this commit
        expected: usize,
    },
}

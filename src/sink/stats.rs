use std::fmt;

/// Statistics from a completed Parquet write
#[derive(Debug, Clone)]
pub struct SinkWriteStats {
    /// Number of rows written to the file
    pub rows_written: usize,
    /// Number of columns in the file schema
    pub columns_written: usize,
    /// Number of Parquet row groups written
    pub row_groups_written: usize,
    /// Total file size in bytes
    pub file_size_bytes: u64,
}

impl fmt::Display for SinkWriteStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} rows ({} columns) in {} row groups",
            self.rows_written, self.columns_written, self.row_groups_written
        )
    }
}

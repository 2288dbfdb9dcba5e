use std::fmt;

/// Snapshot of a table's shape
#[derive(Debug, Clone)]
pub struct TableStats {
    /// Number of rows committed to the sink
    pub rows_committed: usize,
    /// Total number of declared columns
    pub columns: usize,
    /// Number of standalone scalar columns
    pub scalar_columns: usize,
    /// Number of standalone vector columns
    pub vector_columns: usize,
    /// Number of declared column groups
    pub groups_declared: usize,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} columns ({} groups) over {} rows",
            self.columns, self.groups_declared, self.rows_committed
        )
    }
}

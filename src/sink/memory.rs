use std::collections::HashMap;

use super::error::SinkError;
use super::{ColumnHandle, RowSink};

/// Committed values of one column, borrowed from a [`MemorySink`].
#[derive(Debug, Clone, Copy)]
pub enum ColumnValues<'a> {
    /// A scalar column: one `f32` per committed row
    Scalar(&'a [f32]),
    /// A vector column: one variable-length sequence per committed row
    Vector(&'a [Vec<f32>]),
}

impl ColumnValues<'_> {
    /// Number of committed rows held by this column.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Scalar(values) => values.len(),
            ColumnValues::Vector(rows) => rows.len(),
        }
    }

    /// True if the column holds no committed rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

enum ColumnData {
    Scalar(Vec<f32>),
    Vector(Vec<Vec<f32>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Scalar(values) => values.len(),
            ColumnData::Vector(rows) => rows.len(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ColumnData::Scalar(_) => "scalar",
            ColumnData::Vector(_) => "vector",
        }
    }
}

struct Column {
    name: String,
    data: ColumnData,
}

/// In-memory storage sink.
///
/// Keeps every committed column in declaration order and exposes read-back
/// accessors, making it the reference sink for tests and for analysis code
/// that wants to post-process the table without going through a file.
#[derive(Default)]
pub struct MemorySink {
    columns: Vec<Column>,
    by_name: HashMap<String, ColumnHandle>,
    rows: usize,
}

impl MemorySink {
    /// Create an empty sink with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed values of the named scalar column, if declared.
    pub fn scalar_values(&self, name: &str) -> Option<&[f32]> {
        match self.column_data(name)? {
            ColumnData::Scalar(values) => Some(values),
            ColumnData::Vector(_) => None,
        }
    }

    /// Committed row-sequences of the named vector column, if declared.
    pub fn vector_values(&self, name: &str) -> Option<&[Vec<f32>]> {
        match self.column_data(name)? {
            ColumnData::Scalar(_) => None,
            ColumnData::Vector(rows) => Some(rows),
        }
    }

    /// Committed length of the named column, if declared.
    pub fn column_len(&self, name: &str) -> Option<usize> {
        self.column_data(name).map(ColumnData::len)
    }

    /// Number of declared columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over all columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, ColumnValues<'_>)> {
        self.columns.iter().map(|c| {
            let values = match &c.data {
                ColumnData::Scalar(values) => ColumnValues::Scalar(values),
                ColumnData::Vector(rows) => ColumnValues::Vector(rows),
            };
            (c.name.as_str(), values)
        })
    }

    fn column_data(&self, name: &str) -> Option<&ColumnData> {
        let handle = self.by_name.get(name)?;
        Some(&self.columns[handle.0].data)
    }

    fn declare(&mut self, name: &str, data: ColumnData) -> Result<ColumnHandle, SinkError> {
        if let Some(&handle) = self.by_name.get(name) {
            let existing = &self.columns[handle.0].data;
            if std::mem::discriminant(existing) != std::mem::discriminant(&data) {
                return Err(SinkError::KindMismatch {
                    name: name.to_string(),
                    existing: existing.kind(),
                });
            }
            return Ok(handle);
        }

        let handle = ColumnHandle(self.columns.len());
        self.columns.push(Column {
            name: name.to_string(),
            data,
        });
        self.by_name.insert(name.to_string(), handle);
        Ok(handle)
    }

    fn column_mut(&mut self, handle: ColumnHandle) -> Result<&mut Column, SinkError> {
        self.columns
            .get_mut(handle.0)
            .ok_or(SinkError::UnknownColumn(handle.0))
    }
}

impl RowSink for MemorySink {
    fn current_row_count(&self) -> usize {
        self.rows
    }

    fn declare_column(&mut self, name: &str) -> Result<ColumnHandle, SinkError> {
        self.declare(name, ColumnData::Scalar(Vec::new()))
    }

    fn declare_vector_column(&mut self, name: &str) -> Result<ColumnHandle, SinkError> {
        self.declare(name, ColumnData::Vector(Vec::new()))
    }

    fn append(&mut self, handle: ColumnHandle, value: f32) -> Result<(), SinkError> {
        let column = self.column_mut(handle)?;
        match &mut column.data {
            ColumnData::Scalar(values) => {
                values.push(value);
                Ok(())
            }
            ColumnData::Vector(_) => Err(SinkError::KindMismatch {
                name: column.name.clone(),
                existing: "vector",
            }),
        }
    }

    fn append_vector(&mut self, handle: ColumnHandle, values: &[f32]) -> Result<(), SinkError> {
        let column = self.column_mut(handle)?;
        match &mut column.data {
            ColumnData::Vector(rows) => {
                rows.push(values.to_vec());
                Ok(())
            }
            ColumnData::Scalar(_) => Err(SinkError::KindMismatch {
                name: column.name.clone(),
                existing: "scalar",
            }),
        }
    }

    fn commit_row(&mut self) -> Result<(), SinkError> {
        let expected = self.rows + 1;
        for column in &self.columns {
            let len = column.data.len();
            if len != expected {
                return Err(SinkError::RowLengthMismatch {
                    name: column.name.clone(),
                    len,
                    expected,
                });
            }
        }
        self.rows = expected;
        Ok(())
    }
}

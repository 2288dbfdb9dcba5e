//! # Storage Sink Module
//!
//! The event table core never touches files itself; it drives a [`RowSink`],
//! the narrow interface the underlying columnar storage engine exposes:
//! declare a column, append committed values to it, advance the row counter.
//!
//! Two sinks are provided:
//!
//! - [`MemorySink`]: keeps committed columns in memory with read-back
//!   accessors. Useful for tests and for post-processing inside the analysis
//!   job itself.
//! - [`ParquetSink`]: buffers committed columns and writes a single Apache
//!   Parquet file on [`ParquetSink::finish`]. Because columns may be declared
//!   mid-stream, the Arrow schema is only known once the table is complete,
//!   so the file is assembled at finish time rather than streamed.
//!
//! Handles returned by `declare_*` are stable indices into sink-owned
//! storage. They stay valid across later declarations and appends; nothing
//! in this crate holds raw pointers into growing buffers.

mod config;
mod error;
mod memory;
mod parquet_sink;
mod stats;

#[cfg(test)]
mod tests;

pub use config::{CompressionType, SinkConfig};
pub use error::SinkError;
pub use memory::{ColumnValues, MemorySink};
pub use parquet_sink::ParquetSink;
pub use stats::SinkWriteStats;

/// Stable identifier for a declared column within a sink.
///
/// Handles are plain indices into sink-owned storage and are never
/// invalidated by subsequent declarations or appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnHandle(pub(crate) usize);

impl ColumnHandle {
    /// The raw index value of this handle.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interface the event table core consumes from the storage engine.
///
/// A sink stores *committed* values only; per-row staging lives in the
/// table's column registry. The table pushes exactly one value per declared
/// column and then calls [`RowSink::commit_row`], which advances the row
/// counter after verifying every column reached the new length.
pub trait RowSink {
    /// Number of rows already committed.
    fn current_row_count(&self) -> usize;

    /// Declare a scalar (one `f32` per row) column.
    ///
    /// Idempotent per distinct name: declaring the same scalar column twice
    /// returns the same handle.
    fn declare_column(&mut self, name: &str) -> Result<ColumnHandle, SinkError>;

    /// Declare a vector column, whose per-row value is a variable-length
    /// sequence of `f32`.
    ///
    /// Idempotent per distinct name, like [`RowSink::declare_column`].
    fn declare_vector_column(&mut self, name: &str) -> Result<ColumnHandle, SinkError>;

    /// Append one committed value to a scalar column.
    fn append(&mut self, handle: ColumnHandle, value: f32) -> Result<(), SinkError>;

    /// Append one committed row-sequence to a vector column.
    fn append_vector(&mut self, handle: ColumnHandle, values: &[f32]) -> Result<(), SinkError>;

    /// Finalize the current row: verify every declared column holds exactly
    /// one value for it, then advance the row counter.
    fn commit_row(&mut self) -> Result<(), SinkError>;
}

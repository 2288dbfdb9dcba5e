use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Builder, ListBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::metadata::TableMetadata;

use super::config::SinkConfig;
use super::error::SinkError;
use super::memory::{ColumnValues, MemorySink};
use super::stats::SinkWriteStats;
use super::{ColumnHandle, RowSink};

/// Parquet-backed storage sink.
///
/// Committed columns accumulate in memory and are written out as one Apache
/// Parquet file when [`ParquetSink::finish`] (or
/// [`ParquetSink::finish_file`]) is called. The file cannot be streamed row
/// by row because the schema is not known up front: the event table declares
/// columns lazily, possibly long after the first rows were committed.
///
/// Scalar columns become `Float32` fields; vector columns become
/// `List<Float32>` fields. Footer key-value metadata carries the serialized
/// [`TableMetadata`].
pub struct ParquetSink {
    store: MemorySink,
    config: SinkConfig,
    metadata: TableMetadata,
}

impl ParquetSink {
    /// Create a sink with the given footer metadata and configuration.
    pub fn new(metadata: TableMetadata, config: SinkConfig) -> Self {
        Self {
            store: MemorySink::new(),
            config,
            metadata,
        }
    }

    /// Access the buffered committed columns.
    pub fn store(&self) -> &MemorySink {
        &self.store
    }

    /// Write the accumulated table to a file at `path`.
    pub fn finish_file<P: AsRef<Path>>(self, path: P) -> Result<SinkWriteStats, SinkError> {
        let file = File::create(path)?;
        self.finish(file)
    }

    /// Write the accumulated table to any `Write` implementation.
    pub fn finish<W: Write + Send>(self, writer: W) -> Result<SinkWriteStats, SinkError> {
        let rows = self.store.current_row_count();

        let mut fields = Vec::with_capacity(self.store.column_count());
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(self.store.column_count());
        let mut scalar_names = Vec::new();
        let mut vector_names = Vec::new();

        for (name, values) in self.store.columns() {
            match values {
                ColumnValues::Scalar(data) => {
                    fields.push(Field::new(name, DataType::Float32, false));
                    let mut builder = Float32Builder::with_capacity(data.len());
                    builder.append_slice(data);
                    arrays.push(Arc::new(builder.finish()));
                    scalar_names.push(name.to_string());
                }
                ColumnValues::Vector(row_values) => {
                    let item = Arc::new(Field::new("item", DataType::Float32, false));
                    fields.push(Field::new(name, DataType::List(item.clone()), false));
                    let mut builder = ListBuilder::new(Float32Builder::new()).with_field(item);
                    for row in row_values {
                        builder.values().append_slice(row);
                        builder.append(true);
                    }
                    arrays.push(Arc::new(builder.finish()));
                    vector_names.push(name.to_string());
                }
            }
        }

        let schema = Arc::new(Schema::new(fields));
        let footer = self.metadata.to_parquet_metadata()?;
        let props = self
            .config
            .to_writer_properties(&footer, &scalar_names, &vector_names);

        // A table with committed rows but no columns has nothing to write;
        // the file then holds zero rows and the stats must say so.
        let rows_written = if arrays.is_empty() { 0 } else { rows };

        let mut writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))?;
        if rows_written > 0 {
            let batch = RecordBatch::try_new(schema.clone(), arrays)?;
            writer.write(&batch)?;
        }
        let file_metadata = writer.close()?;

        log::debug!(
            "finished parquet table '{}': {} rows, {} columns",
            self.metadata.name,
            rows_written,
            schema.fields().len()
        );

        Ok(SinkWriteStats {
            rows_written,
            columns_written: schema.fields().len(),
            row_groups_written: file_metadata.row_groups.len(),
            file_size_bytes: file_metadata
                .row_groups
                .iter()
                .map(|rg| rg.total_byte_size as u64)
                .sum(),
        })
    }
}

impl RowSink for ParquetSink {
    fn current_row_count(&self) -> usize {
        self.store.current_row_count()
    }

    fn declare_column(&mut self, name: &str) -> Result<ColumnHandle, SinkError> {
        self.store.declare_column(name)
    }

    fn declare_vector_column(&mut self, name: &str) -> Result<ColumnHandle, SinkError> {
        self.store.declare_vector_column(name)
    }

    fn append(&mut self, handle: ColumnHandle, value: f32) -> Result<(), SinkError> {
        self.store.append(handle, value)
    }

    fn append_vector(&mut self, handle: ColumnHandle, values: &[f32]) -> Result<(), SinkError> {
        self.store.append_vector(handle, values)
    }

    fn commit_row(&mut self) -> Result<(), SinkError> {
        self.store.commit_row()
    }
}

use arrow::array::{Array, Float32Array, ListArray};
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::*;
use crate::metadata::{TableMetadata, KEY_FORMAT_VERSION};

#[test]
fn test_declare_is_idempotent_per_name() {
    let mut sink = MemorySink::new();
    let a = sink.declare_column("a").unwrap();
    let again = sink.declare_column("a").unwrap();
    assert_eq!(a, again);
    assert_eq!(sink.column_count(), 1);
}

#[test]
fn test_declare_kind_mismatch() {
    let mut sink = MemorySink::new();
    sink.declare_column("a").unwrap();
    let err = sink.declare_vector_column("a").unwrap_err();
    assert!(matches!(err, SinkError::KindMismatch { .. }));
}

#[test]
fn test_append_kind_mismatch() {
    let mut sink = MemorySink::new();
    let v = sink.declare_vector_column("v").unwrap();
    let err = sink.append(v, 1.0).unwrap_err();
    assert!(matches!(err, SinkError::KindMismatch { .. }));
}

#[test]
fn test_commit_row_advances_counter() {
    let mut sink = MemorySink::new();
    let a = sink.declare_column("a").unwrap();
    let v = sink.declare_vector_column("v").unwrap();

    for i in 0..3 {
        sink.append(a, i as f32).unwrap();
        sink.append_vector(v, &[i as f32]).unwrap();
        sink.commit_row().unwrap();
    }

    assert_eq!(sink.current_row_count(), 3);
    assert_eq!(sink.scalar_values("a").unwrap(), &[0.0, 1.0, 2.0]);
    assert_eq!(sink.vector_values("v").unwrap().len(), 3);
}

#[test]
fn test_overfilled_column_rejected_at_commit() {
    let mut sink = MemorySink::new();
    let a = sink.declare_column("a").unwrap();
    sink.append(a, 1.0).unwrap();
    sink.append(a, 2.0).unwrap();

    let err = sink.commit_row().unwrap_err();
    assert!(matches!(err, SinkError::RowLengthMismatch { len: 2, .. }));
}

#[test]
fn test_parquet_round_trip() {
    let mut sink = ParquetSink::new(TableMetadata::new("test"), SinkConfig::default());

    let w = sink.declare_column("weight").unwrap();
    let pt = sink.declare_vector_column("jet_pt").unwrap();
    for i in 0..4 {
        sink.append(w, i as f32).unwrap();
        sink.append_vector(pt, &[10.0 * i as f32, 5.0]).unwrap();
        sink.commit_row().unwrap();
    }

    let mut buf = Vec::new();
    let stats = sink.finish(&mut buf).unwrap();
    assert_eq!(stats.rows_written, 4);
    assert_eq!(stats.columns_written, 2);

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(buf)).unwrap();

    // Footer metadata carries the format version.
    let kv = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .unwrap();
    assert!(kv.iter().any(|kv| kv.key == KEY_FORMAT_VERSION));

    let mut reader = builder.build().unwrap();
    let batch = reader.next().unwrap().unwrap();
    assert_eq!(batch.num_rows(), 4);
    assert_eq!(batch.num_columns(), 2);

    let weights = batch
        .column_by_name("weight")
        .unwrap()
        .as_any()
        .downcast_ref::<Float32Array>()
        .unwrap();
    assert_eq!(weights.value(2), 2.0);

    let jet_pt = batch
        .column_by_name("jet_pt")
        .unwrap()
        .as_any()
        .downcast_ref::<ListArray>()
        .unwrap();
    let row = jet_pt.value(3);
    let row = row.as_any().downcast_ref::<Float32Array>().unwrap();
    assert_eq!(row.value(0), 30.0);
    assert_eq!(row.value(1), 5.0);
}

#[test]
fn test_parquet_rows_without_columns() {
    let mut sink = ParquetSink::new(TableMetadata::default(), SinkConfig::default());

    // Rows committed before any column exists leave nothing to write.
    for _ in 0..5 {
        sink.commit_row().unwrap();
    }

    let mut buf = Vec::new();
    let stats = sink.finish(&mut buf).unwrap();
    assert_eq!(stats.rows_written, 0);
    assert_eq!(stats.columns_written, 0);

    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::from(buf)).unwrap();
    assert_eq!(builder.metadata().file_metadata().num_rows(), 0);
}

#[test]
fn test_parquet_empty_table() {
    let sink = ParquetSink::new(TableMetadata::default(), SinkConfig::fast_write());
    let mut buf = Vec::new();
    let stats = sink.finish(&mut buf).unwrap();
    assert_eq!(stats.rows_written, 0);
    assert_eq!(stats.columns_written, 0);
}

use std::collections::HashMap;

use parquet::basic::{Compression, Encoding, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

/// Compression options for Parquet output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression (recommended, best compression ratio)
    Zstd(i32),
    /// Snappy compression (faster, slightly larger files)
    Snappy,
    /// No compression (fastest write, largest files)
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        // ZSTD level 3 is a good balance of speed and compression
        Self::Zstd(3)
    }
}

impl CompressionType {
    /// Maximum compression (slower write, smallest files)
    pub fn max_compression() -> Self {
        Self::Zstd(22)
    }

    /// Balanced compression (recommended default)
    pub fn balanced() -> Self {
        Self::Zstd(3)
    }

    /// Fast compression (faster write, larger files)
    pub fn fast() -> Self {
        Self::Snappy
    }
}

/// Configuration for the Parquet storage sink
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Compression type to use
    pub compression: CompressionType,

    /// Target row group size (number of rows per group)
    /// Smaller = better random access, larger = better compression
    pub row_group_size: usize,

    /// Data page size in bytes
    pub data_page_size: usize,

    /// Whether to write statistics for columns
    pub write_statistics: bool,

    /// Enable BYTE_STREAM_SPLIT encoding for the float columns.
    /// Kinematic quantities within one sample are strongly correlated, so
    /// grouping exponent and mantissa bytes together compresses well.
    pub use_byte_stream_split: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zstd(3),
            // Analysis ntuples rarely exceed a few million events; 64k rows
            // per group keeps random access cheap.
            row_group_size: 65_536,
            // 1MB data pages
            data_page_size: 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
        }
    }
}

impl SinkConfig {
    /// Configuration optimized for maximum compression (slower write)
    pub fn max_compression() -> Self {
        Self {
            compression: CompressionType::Zstd(22),
            row_group_size: 262_144,
            data_page_size: 2 * 1024 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
        }
    }

    /// Configuration optimized for fast writing (larger files)
    pub fn fast_write() -> Self {
        Self {
            compression: CompressionType::Snappy,
            row_group_size: 32_768,
            data_page_size: 512 * 1024,
            write_statistics: true,
            use_byte_stream_split: true,
        }
    }

    /// Create writer properties from this configuration.
    ///
    /// `scalar_columns` and `vector_columns` are the declared column names,
    /// used to target per-column encodings; vector columns live at the
    /// nested `name.list.item` Parquet path.
    pub(super) fn to_writer_properties(
        &self,
        metadata: &HashMap<String, String>,
        scalar_columns: &[String],
        vector_columns: &[String],
    ) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or(ZstdLevel::default()))
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_data_page_size_limit(self.data_page_size)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // Kinematic float data is high-cardinality; dictionary encoding
        // buys nothing there, while BYTE_STREAM_SPLIT helps substantially.
        let scalar_paths = scalar_columns
            .iter()
            .map(|name| ColumnPath::new(vec![name.clone()]));
        let vector_paths = vector_columns.iter().map(|name| {
            ColumnPath::new(vec![name.clone(), "list".to_string(), "item".to_string()])
        });

        for path in scalar_paths.chain(vector_paths) {
            builder = builder.set_column_dictionary_enabled(path.clone(), false);
            if self.use_byte_stream_split {
                builder = builder.set_column_encoding(path, Encoding::BYTE_STREAM_SPLIT);
            }
        }

        // Add key-value metadata
        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder = builder.set_key_value_metadata(Some(kv_metadata));

        builder.build()
    }
}

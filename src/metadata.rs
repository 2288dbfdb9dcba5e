//! # Table Metadata
//!
//! Provenance metadata attached to a written table: a human-readable name,
//! an optional description, the creation timestamp, and free-form entries
//! (generator tags, campaign names, selection versions). The whole structure
//! is serialized to JSON and embedded in the Parquet footer's key-value
//! metadata, so a table stays interpretable years later without any sidecar
//! files.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version string of the evtable file layout
pub const FORMAT_VERSION: &str = "0.1.0";

/// Footer key holding the format version
pub const KEY_FORMAT_VERSION: &str = "evtable:format_version";
/// Footer key holding the JSON-serialized [`TableMetadata`]
pub const KEY_TABLE_METADATA: &str = "evtable:table_metadata";
/// Footer key identifying the writing library
pub const KEY_WRITER_INFO: &str = "evtable:writer_info";

/// Errors that can occur during metadata processing
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Provenance metadata for one output table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name (e.g., "nominal", "sys_jes_up")
    pub name: String,

    /// Optional human-readable description
    pub description: Option<String>,

    /// Creation timestamp
    pub created: DateTime<Utc>,

    /// Free-form provenance entries
    pub entries: HashMap<String, String>,
}

impl Default for TableMetadata {
    fn default() -> Self {
        Self::new("output")
    }
}

impl TableMetadata {
    /// Create metadata for a table with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            created: Utc::now(),
            entries: HashMap::new(),
        }
    }

    /// Set the description, builder-style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a free-form provenance entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Serialize this structure to JSON.
    pub fn to_json(&self) -> Result<String, MetadataError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build the key-value map embedded in the Parquet footer.
    pub fn to_parquet_metadata(&self) -> Result<HashMap<String, String>, MetadataError> {
        let mut metadata = HashMap::new();

        metadata.insert(KEY_FORMAT_VERSION.to_string(), FORMAT_VERSION.to_string());
        metadata.insert(
            KEY_WRITER_INFO.to_string(),
            format!("evtable-rs v{}", env!("CARGO_PKG_VERSION")),
        );
        metadata.insert(KEY_TABLE_METADATA.to_string(), self.to_json()?);

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let mut metadata = TableMetadata::new("nominal").with_description("baseline selection");
        metadata.insert("campaign", "mc23d");

        let json = metadata.to_json().unwrap();
        let parsed: TableMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "nominal");
        assert_eq!(
            parsed.entries.get("campaign").map(String::as_str),
            Some("mc23d")
        );
    }

    #[test]
    fn test_parquet_footer_keys() {
        let metadata = TableMetadata::default();
        let footer = metadata.to_parquet_metadata().unwrap();

        assert_eq!(
            footer.get(KEY_FORMAT_VERSION).map(String::as_str),
            Some(FORMAT_VERSION)
        );
        assert!(footer.contains_key(KEY_TABLE_METADATA));
        assert!(footer.contains_key(KEY_WRITER_INFO));
    }
}

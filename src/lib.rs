//! # evtable - Dynamic-Schema Event Tables for HEP Analysis
//!
//! `evtable` writes per-event physics measurements into named columns of an
//! output table, with a twist that makes exploratory analysis pleasant:
//! **columns may be declared after rows have already been committed**. A new
//! column is backfilled with defaults so every column stays length-aligned,
//! which means fill code can add an observable on event 40,000 of a job
//! without invalidating the first 39,999 events.
//!
//! ## Key Features
//!
//! - **Lazy, idempotent column groups**: `add_jet("sel_jets", jet)` creates
//!   the `sel_jets_pt` / `sel_jets_eta` / `sel_jets_phi` / `sel_jets_m`
//!   columns on first use and is a no-op declaration afterwards.
//!
//! - **Representation-polymorphic fills**: anything implementing
//!   [`kinematics::HasFourMomentum`] can be filled as a photon or jet —
//!   plain four-momenta, clustered jets, or references to framework objects,
//!   singly or from any iterable container.
//!
//! - **Pluggable storage**: the table drives a narrow [`sink::RowSink`]
//!   interface. Use [`sink::MemorySink`] for in-process read-back or
//!   [`sink::ParquetSink`] to persist the table as an Apache Parquet file
//!   readable by any Parquet tool.
//!
//! - **Misuse detection**: cross-kind name collisions and a missing
//!   `clear()` between rows are reported as errors instead of silently
//!   corrupting row boundaries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use evtable::kinematics::FourMomentum;
//! use evtable::metadata::TableMetadata;
//! use evtable::sink::{ParquetSink, SinkConfig};
//! use evtable::table::EventTable;
//!
//! let sink = ParquetSink::new(TableMetadata::new("nominal"), SinkConfig::default());
//! let mut table = EventTable::new(sink);
//!
//! // Per-event fill loop
//! for _event in 0..3 {
//!     table.add_scalar("weight", 1.0)?;
//!     table.add_jet("jets", FourMomentum::new(52.0, 0.3, 1.1, 8.2))?;
//!     table.commit()?;
//!     table.clear();
//! }
//!
//! let stats = table.into_sink().finish_file("nominal.parquet")?;
//! println!("{stats}");
//! # Ok::<(), evtable::table::TableError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`table`]: the column registry, backfill logic, row buffer, and the
//!   [`table::EventTable`] facade
//! - [`kinematics`]: four-momentum extraction from upstream object
//!   representations
//! - [`sink`]: the storage interface plus in-memory and Parquet sinks
//! - [`metadata`]: provenance metadata embedded in the Parquet footer
//!
//! ## Row cycle
//!
//! Each event goes through `add_*` calls, then [`table::EventTable::commit`]
//! (which pushes one value per declared column into the sink and advances
//! its row counter), then [`table::EventTable::clear`]. Scalar slots persist
//! across `clear()`; vector and group staging is emptied.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod kinematics;
pub mod metadata;
pub mod sink;
pub mod table;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::kinematics::{ClusteredJet, FourMomentum, HasFourMomentum, TruthLike, TruthParticle};
    pub use crate::metadata::{MetadataError, TableMetadata};
    pub use crate::sink::{
        ColumnHandle, ColumnValues, CompressionType, MemorySink, ParquetSink, RowSink, SinkConfig,
        SinkError, SinkWriteStats,
    };
    pub use crate::table::{EventTable, GroupKind, TableError, TableStats};
}

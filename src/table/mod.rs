//! # Event Table Module
//!
//! The core of the crate: a dynamic-schema row writer for per-event physics
//! measurements.
//!
//! ## Design Principles
//!
//! 1. **Lazy columns with backfill**: a column or column group springs into
//!    existence the first time it is filled, and is immediately padded with
//!    defaults up to the committed row count. Every column is therefore
//!    always exactly row-count long after a commit, no matter when it was
//!    declared.
//!
//! 2. **Idempotent group declaration**: declaring the same group name twice
//!    is a no-op, so fill code can unconditionally ensure its columns exist.
//!
//! 3. **Arena ownership**: the registry owns all staging buffers by value
//!    and addresses them by index; sink handles are stable indices too.
//!    Nothing holds pointers into growing containers.
//!
//! 4. **Caller-visible misuse**: name collisions across column kinds and a
//!    missed `clear()` between rows return errors rather than silently
//!    corrupting row boundaries.

mod error;
mod groups;
mod registry;
mod stats;
mod table_impl;

#[cfg(test)]
mod tests;

pub use error::TableError;
pub use groups::{group_column_name, GroupKind, JET_FIELDS, PHOTON_FIELDS, TRUTH_FIELDS};
pub use stats::TableStats;
pub use table_impl::EventTable;

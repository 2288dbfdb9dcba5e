use std::collections::HashMap;

use crate::sink::{ColumnHandle, RowSink, SinkError};

use super::error::TableError;
use super::groups::{group_column_name, GroupKind, GROUP_KIND_COUNT};

/// Index of a column within the registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ColumnId(usize);

/// How a column name came to exist, for collision diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnOrigin {
    Scalar,
    Vector,
    Group(GroupKind),
}

impl ColumnOrigin {
    fn label(self) -> &'static str {
        match self {
            ColumnOrigin::Scalar => "scalar",
            ColumnOrigin::Vector => "vector",
            ColumnOrigin::Group(GroupKind::Photon) => "photon group",
            ColumnOrigin::Group(GroupKind::Jet) => "jet group",
            ColumnOrigin::Group(GroupKind::Truth) => "truth group",
        }
    }
}

/// Current-row staging for one column.
///
/// Scalar slots keep their last value across `clear()`, matching the
/// original writer's behavior; vector staging is emptied every row.
enum Staging {
    Scalar(f32),
    Vector(Vec<f32>),
}

struct ColumnEntry {
    handle: ColumnHandle,
    origin: ColumnOrigin,
    staging: Staging,
}

/// Owns every column's staging buffer and the per-kind declared-group sets.
///
/// All storage is held by value and addressed by [`ColumnId`] index, so
/// handles stay valid as columns are added. Declaration is lazy: the first
/// `ensure_*` call for a name creates the column through the sink and
/// backfills it to the sink's committed row count, establishing the
/// invariant that every column is exactly row-count long after each commit.
#[derive(Default)]
pub(super) struct ColumnRegistry {
    columns: Vec<ColumnEntry>,
    by_name: HashMap<String, ColumnId>,
    groups: [HashMap<String, Vec<ColumnId>>; GROUP_KIND_COUNT],
}

impl ColumnRegistry {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Look up or create a scalar column, backfilling on creation.
    pub(super) fn ensure_scalar<S: RowSink>(
        &mut self,
        sink: &mut S,
        name: &str,
    ) -> Result<ColumnId, TableError> {
        if let Some(&id) = self.by_name.get(name) {
            let entry = &self.columns[id.0];
            if entry.origin != ColumnOrigin::Scalar {
                return Err(TableError::NameCollision {
                    name: name.to_string(),
                    existing: entry.origin.label(),
                });
            }
            return Ok(id);
        }

        let handle = sink.declare_column(name)?;
        let rows = sink.current_row_count();
        for _ in 0..rows {
            sink.append(handle, 0.0)?;
        }
        log::debug!("declared scalar column '{name}', backfilled {rows} rows");

        Ok(self.insert(name, handle, ColumnOrigin::Scalar, Staging::Scalar(0.0)))
    }

    /// Look up or create a plain vector column, backfilling on creation.
    pub(super) fn ensure_vector<S: RowSink>(
        &mut self,
        sink: &mut S,
        name: &str,
    ) -> Result<ColumnId, TableError> {
        if let Some(&id) = self.by_name.get(name) {
            let entry = &self.columns[id.0];
            if entry.origin != ColumnOrigin::Vector {
                return Err(TableError::NameCollision {
                    name: name.to_string(),
                    existing: entry.origin.label(),
                });
            }
            return Ok(id);
        }

        let id = self.declare_backfilled(sink, name, ColumnOrigin::Vector)?;
        log::debug!(
            "declared vector column '{name}', backfilled {} rows",
            sink.current_row_count()
        );
        Ok(id)
    }

    /// Declare a column group, idempotently.
    ///
    /// On first declaration, creates one vector column per field suffix and
    /// backfills each with the sink's committed row count worth of empty
    /// sequences. Declaring the same (kind, name) again is a no-op; the
    /// member column ids are returned either way, in field order.
    pub(super) fn ensure_group<S: RowSink>(
        &mut self,
        sink: &mut S,
        kind: GroupKind,
        name: &str,
    ) -> Result<Vec<ColumnId>, TableError> {
        if let Some(ids) = self.groups[kind.index()].get(name) {
            return Ok(ids.clone());
        }

        // Reject names whose member columns already belong to something else
        // before declaring anything, so a collision never half-creates a group.
        for suffix in kind.field_suffixes() {
            let column_name = group_column_name(name, suffix);
            if let Some(&id) = self.by_name.get(&column_name) {
                return Err(TableError::NameCollision {
                    name: column_name,
                    existing: self.columns[id.0].origin.label(),
                });
            }
        }

        let mut ids = Vec::with_capacity(kind.field_suffixes().len());
        for suffix in kind.field_suffixes() {
            let column_name = group_column_name(name, suffix);
            let id = self.declare_backfilled(sink, &column_name, ColumnOrigin::Group(kind))?;
            ids.push(id);
        }
        log::debug!(
            "declared {} group '{name}' ({} columns), backfilled {} rows",
            kind.label(),
            ids.len(),
            sink.current_row_count()
        );

        self.groups[kind.index()].insert(name.to_string(), ids.clone());
        Ok(ids)
    }

    /// Append one object's field values to a group's member columns.
    pub(super) fn append_group_item<S: RowSink>(
        &mut self,
        sink: &mut S,
        kind: GroupKind,
        name: &str,
        values: &[f32],
    ) -> Result<(), TableError> {
        let ids = self.ensure_group(sink, kind, name)?;
        debug_assert_eq!(ids.len(), values.len());
        for (id, &value) in ids.iter().zip(values) {
            if let Staging::Vector(staged) = &mut self.columns[id.0].staging {
                staged.push(value);
            }
        }
        Ok(())
    }

    /// Overwrite a scalar column's current-row slot.
    pub(super) fn stage_scalar(&mut self, id: ColumnId, value: f32) {
        if let Staging::Scalar(slot) = &mut self.columns[id.0].staging {
            *slot = value;
        }
    }

    /// Extend a vector column's current-row sequence.
    pub(super) fn extend_vector(&mut self, id: ColumnId, values: &[f32]) {
        if let Staging::Vector(staged) = &mut self.columns[id.0].staging {
            staged.extend_from_slice(values);
        }
    }

    /// Push every column's current-row value into the sink.
    pub(super) fn flush_into<S: RowSink>(&self, sink: &mut S) -> Result<(), SinkError> {
        for entry in &self.columns {
            match &entry.staging {
                Staging::Scalar(value) => sink.append(entry.handle, *value)?,
                Staging::Vector(staged) => sink.append_vector(entry.handle, staged)?,
            }
        }
        Ok(())
    }

    /// Empty all vector staging. Scalar slots are left alone.
    pub(super) fn clear_staging(&mut self) {
        for entry in &mut self.columns {
            if let Staging::Vector(staged) = &mut entry.staging {
                staged.clear();
            }
        }
    }

    pub(super) fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub(super) fn scalar_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.origin == ColumnOrigin::Scalar)
            .count()
    }

    pub(super) fn vector_column_count(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| c.origin == ColumnOrigin::Vector)
            .count()
    }

    pub(super) fn group_count(&self) -> usize {
        self.groups.iter().map(HashMap::len).sum()
    }

    fn insert(
        &mut self,
        name: &str,
        handle: ColumnHandle,
        origin: ColumnOrigin,
        staging: Staging,
    ) -> ColumnId {
        let id = ColumnId(self.columns.len());
        self.columns.push(ColumnEntry {
            handle,
            origin,
            staging,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    fn declare_backfilled<S: RowSink>(
        &mut self,
        sink: &mut S,
        name: &str,
        origin: ColumnOrigin,
    ) -> Result<ColumnId, TableError> {
        let handle = sink.declare_vector_column(name)?;
        let rows = sink.current_row_count();
        for _ in 0..rows {
            sink.append_vector(handle, &[])?;
        }
        Ok(self.insert(name, handle, origin, Staging::Vector(Vec::new())))
    }
}

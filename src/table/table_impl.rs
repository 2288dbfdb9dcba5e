use crate::kinematics::{HasFourMomentum, TruthLike};
use crate::sink::RowSink;

use super::error::TableError;
use super::groups::GroupKind;
use super::registry::ColumnRegistry;
use super::stats::TableStats;

/// Dynamic-schema event table writer.
///
/// Accumulates per-event measurements into named columns of the underlying
/// sink. Columns are created lazily on first use and backfilled with
/// defaults, so new observables can be added mid-job without misaligning
/// earlier events.
///
/// The per-event cycle is: one or more `add_*` calls, [`EventTable::commit`]
/// to finalize the row, then [`EventTable::clear`] before the next event.
/// Appending after a commit without clearing returns
/// [`TableError::StaleRowBuffer`] instead of silently merging two rows.
pub struct EventTable<S: RowSink> {
    sink: S,
    registry: ColumnRegistry,
    needs_clear: bool,
}

impl<S: RowSink> EventTable<S> {
    /// Create a table writing into the given sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            registry: ColumnRegistry::new(),
            needs_clear: false,
        }
    }

    /// Record a scalar under `name` for the current row.
    ///
    /// The first use of a name creates the column and backfills it with
    /// zeros up to the committed row count. Repeat calls within one row
    /// overwrite the slot. Scalar slots persist across [`EventTable::clear`];
    /// an event that never sets the scalar commits the previous value.
    pub fn add_scalar(&mut self, name: &str, value: f32) -> Result<(), TableError> {
        self.check_row_open()?;
        let id = self.registry.ensure_scalar(&mut self.sink, name)?;
        self.registry.stage_scalar(id, value);
        Ok(())
    }

    /// Append values to the vector column `name` for the current row.
    ///
    /// The first use of a name creates the column and backfills it with
    /// empty sequences. Repeat calls within one row accumulate into a single
    /// growing sequence, committed as the row's value.
    pub fn add_vector(&mut self, name: &str, values: &[f32]) -> Result<(), TableError> {
        self.check_row_open()?;
        let id = self.registry.ensure_vector(&mut self.sink, name)?;
        self.registry.extend_vector(id, values);
        Ok(())
    }

    /// Declare a photon group without appending anything. Idempotent.
    pub fn declare_photon_group(&mut self, name: &str) -> Result<(), TableError> {
        self.registry
            .ensure_group(&mut self.sink, GroupKind::Photon, name)
            .map(|_| ())
    }

    /// Declare a jet group without appending anything. Idempotent.
    pub fn declare_jet_group(&mut self, name: &str) -> Result<(), TableError> {
        self.registry
            .ensure_group(&mut self.sink, GroupKind::Jet, name)
            .map(|_| ())
    }

    /// Declare a truth-particle group without appending anything. Idempotent.
    pub fn declare_truth_group(&mut self, name: &str) -> Result<(), TableError> {
        self.registry
            .ensure_group(&mut self.sink, GroupKind::Truth, name)
            .map(|_| ())
    }

    /// Append one photon to the group `name`, declaring it if needed.
    pub fn add_photon<P: HasFourMomentum>(
        &mut self,
        name: &str,
        photon: P,
    ) -> Result<(), TableError> {
        self.check_row_open()?;
        let p4 = photon.four_momentum();
        self.registry.append_group_item(
            &mut self.sink,
            GroupKind::Photon,
            name,
            &[p4.pt() as f32, p4.eta() as f32, p4.phi() as f32],
        )
    }

    /// Append every photon in `photons` to the group `name`, in iteration
    /// order.
    pub fn add_photons<I>(&mut self, name: &str, photons: I) -> Result<(), TableError>
    where
        I: IntoIterator,
        I::Item: HasFourMomentum,
    {
        for photon in photons {
            self.add_photon(name, photon)?;
        }
        Ok(())
    }

    /// Append one jet to the group `name`, declaring it if needed.
    ///
    /// Accepts anything that can produce a four-momentum: a plain
    /// [`FourMomentum`](crate::kinematics::FourMomentum), a
    /// [`ClusteredJet`](crate::kinematics::ClusteredJet), or a reference to
    /// a jet-like object.
    pub fn add_jet<J: HasFourMomentum>(&mut self, name: &str, jet: J) -> Result<(), TableError> {
        self.check_row_open()?;
        let p4 = jet.four_momentum();
        self.registry.append_group_item(
            &mut self.sink,
            GroupKind::Jet,
            name,
            &[
                p4.pt() as f32,
                p4.eta() as f32,
                p4.phi() as f32,
                p4.mass() as f32,
            ],
        )
    }

    /// Append every jet in `jets` to the group `name`, in iteration order.
    ///
    /// One row-slice per item; a container of handles works through the
    /// reference impl of `HasFourMomentum`.
    pub fn add_jets<I>(&mut self, name: &str, jets: I) -> Result<(), TableError>
    where
        I: IntoIterator,
        I::Item: HasFourMomentum,
    {
        for jet in jets {
            self.add_jet(name, jet)?;
        }
        Ok(())
    }

    /// Append one truth particle to the group `name`, declaring it if
    /// needed. Status and PDG id are stored as floats alongside the
    /// kinematic fields.
    pub fn add_truth<T: TruthLike>(&mut self, name: &str, particle: T) -> Result<(), TableError> {
        self.check_row_open()?;
        let p4 = particle.four_momentum();
        self.registry.append_group_item(
            &mut self.sink,
            GroupKind::Truth,
            name,
            &[
                p4.pt() as f32,
                p4.eta() as f32,
                p4.phi() as f32,
                p4.mass() as f32,
                particle.status() as f32,
                particle.pdg_id() as f32,
            ],
        )
    }

    /// Append every particle in `particles` to the group `name`, in
    /// iteration order.
    pub fn add_truths<I>(&mut self, name: &str, particles: I) -> Result<(), TableError>
    where
        I: IntoIterator,
        I::Item: TruthLike,
    {
        for particle in particles {
            self.add_truth(name, particle)?;
        }
        Ok(())
    }

    /// Finalize the current row: push every column's staged value into the
    /// sink and advance its row counter.
    pub fn commit(&mut self) -> Result<(), TableError> {
        self.registry.flush_into(&mut self.sink)?;
        self.sink.commit_row()?;
        self.needs_clear = true;
        log::trace!("committed row {}", self.sink.current_row_count());
        Ok(())
    }

    /// Reset the row buffer for the next event.
    ///
    /// Empties every vector and group column's staged sequence; column
    /// definitions, committed rows, and scalar slots are untouched.
    pub fn clear(&mut self) {
        self.registry.clear_staging();
        self.needs_clear = false;
    }

    /// Number of rows committed so far.
    pub fn row_count(&self) -> usize {
        self.sink.current_row_count()
    }

    /// Snapshot of the table's shape.
    pub fn stats(&self) -> TableStats {
        TableStats {
            rows_committed: self.sink.current_row_count(),
            columns: self.registry.column_count(),
            scalar_columns: self.registry.scalar_column_count(),
            vector_columns: self.registry.vector_column_count(),
            groups_declared: self.registry.group_count(),
        }
    }

    /// Access the underlying sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the table, returning the sink for finalization.
    pub fn into_sink(self) -> S {
        self.sink
    }

    fn check_row_open(&self) -> Result<(), TableError> {
        if self.needs_clear {
            return Err(TableError::StaleRowBuffer);
        }
        Ok(())
    }
}

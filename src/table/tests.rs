use super::*;
use crate::kinematics::{ClusteredJet, FourMomentum, HasFourMomentum, TruthParticle};
use crate::sink::{MemorySink, RowSink, SinkError};

fn table() -> EventTable<MemorySink> {
    EventTable::new(MemorySink::new())
}

#[test]
fn test_length_invariant_after_commits() {
    let mut t = table();
    for i in 0..5 {
        t.add_scalar("weight", i as f32).unwrap();
        t.add_vector("trk_pt", &[1.0, 2.0]).unwrap();
        t.add_jet("jets", FourMomentum::new(40.0, 0.1, 0.2, 5.0))
            .unwrap();
        t.commit().unwrap();
        t.clear();
    }

    assert_eq!(t.row_count(), 5);
    let sink = t.sink();
    assert_eq!(sink.column_len("weight"), Some(5));
    assert_eq!(sink.column_len("trk_pt"), Some(5));
    for suffix in JET_FIELDS {
        assert_eq!(sink.column_len(&format!("jets_{suffix}")), Some(5));
    }
}

#[test]
fn test_backfill_after_committed_rows() {
    let mut t = table();
    for _ in 0..4 {
        t.add_scalar("x", 1.0).unwrap();
        t.commit().unwrap();
        t.clear();
    }

    // First declaration after 4 rows pads every member column to length 4.
    t.declare_jet_group("late").unwrap();
    for suffix in JET_FIELDS {
        let rows = t.sink().vector_values(&format!("late_{suffix}")).unwrap();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(Vec::is_empty));
    }
}

#[test]
fn test_scalar_backfill_holds_zeros() {
    let mut t = table();
    for _ in 0..3 {
        t.add_vector("v", &[1.0]).unwrap();
        t.commit().unwrap();
        t.clear();
    }

    // A scalar declared after 3 rows gets zeros for each of them.
    t.add_scalar("late", 7.0).unwrap();
    t.commit().unwrap();

    assert_eq!(t.sink().scalar_values("late").unwrap(), &[0.0, 0.0, 0.0, 7.0]);
}

#[test]
fn test_idempotent_group_declaration() {
    let mut t = table();
    t.add_scalar("x", 1.0).unwrap();
    t.commit().unwrap();
    t.clear();

    t.declare_jet_group("jets").unwrap();
    let before = t.sink().column_count();
    let len_before = t.sink().column_len("jets_pt");

    t.declare_jet_group("jets").unwrap();
    assert_eq!(t.sink().column_count(), before);
    assert_eq!(t.sink().column_len("jets_pt"), len_before);
}

#[test]
fn test_jet_field_order() {
    let mut t = table();
    t.add_jet("j", FourMomentum::new(40.0, 1.5, -2.0, 9.0)).unwrap();
    t.commit().unwrap();

    let sink = t.sink();
    let last = |name: &str| *sink.vector_values(name).unwrap()[0].last().unwrap();
    assert_eq!(last("j_pt"), 40.0);
    assert_eq!(last("j_eta"), 1.5);
    assert_eq!(last("j_phi"), -2.0);
    assert_eq!(last("j_m"), 9.0);
}

#[test]
fn test_multi_item_expansion_preserves_order() {
    let mut t = table();
    let jet_a = FourMomentum::new(100.0, 0.5, 0.1, 10.0);
    let jet_b = FourMomentum::new(50.0, -1.0, 2.5, 7.0);
    t.add_jets("j", [jet_a, jet_b]).unwrap();
    t.commit().unwrap();

    for suffix in JET_FIELDS {
        assert_eq!(t.sink().vector_values(&format!("j_{suffix}")).unwrap()[0].len(), 2);
    }
    let pts = &t.sink().vector_values("j_pt").unwrap()[0];
    assert_eq!(pts.as_slice(), &[100.0, 50.0]);
}

#[test]
fn test_jet_representations_agree() {
    // A clustered jet and the equivalent four-momentum fill identical slices.
    let jet = ClusteredJet::new(30.0, 40.0, 0.0, 55.0);
    let p4 = jet.four_momentum();

    let mut t = table();
    t.add_jet("a", jet).unwrap();
    t.add_jet("b", p4).unwrap();
    // Containers of references also work.
    let handles = [&jet];
    t.add_jets("c", handles).unwrap();
    t.commit().unwrap();

    let sink = t.sink();
    for suffix in JET_FIELDS {
        let a = &sink.vector_values(&format!("a_{suffix}")).unwrap()[0];
        let b = &sink.vector_values(&format!("b_{suffix}")).unwrap()[0];
        let c = &sink.vector_values(&format!("c_{suffix}")).unwrap()[0];
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}

#[test]
fn test_truth_fields() {
    let mut t = table();
    let particle = TruthParticle::new(FourMomentum::new(25.0, 0.0, 1.0, 0.0), 1, 22);
    t.add_truth("tp", particle).unwrap();
    t.add_truths("tp", [&particle]).unwrap();
    t.commit().unwrap();

    let sink = t.sink();
    assert_eq!(sink.vector_values("tp_status").unwrap()[0].as_slice(), &[1.0, 1.0]);
    assert_eq!(sink.vector_values("tp_pid").unwrap()[0].as_slice(), &[22.0, 22.0]);
    assert_eq!(sink.vector_values("tp_pt").unwrap()[0].as_slice(), &[25.0, 25.0]);
}

#[test]
fn test_clear_resets_vector_staging() {
    let mut t = table();
    t.add_vector("v", &[1.0, 2.0]).unwrap();
    t.commit().unwrap();
    t.clear();

    t.add_vector("v", &[3.0]).unwrap();
    t.commit().unwrap();

    let rows = t.sink().vector_values("v").unwrap();
    assert_eq!(rows[0].as_slice(), &[1.0, 2.0]);
    assert_eq!(rows[1].as_slice(), &[3.0]);
}

#[test]
fn test_vector_accumulates_within_row() {
    let mut t = table();
    t.add_vector("v", &[1.0]).unwrap();
    t.add_vector("v", &[2.0, 3.0]).unwrap();
    t.commit().unwrap();

    assert_eq!(t.sink().vector_values("v").unwrap()[0].as_slice(), &[1.0, 2.0, 3.0]);
}

#[test]
fn test_scalar_slot_persists_across_clear() {
    let mut t = table();
    t.add_scalar("w", 5.0).unwrap();
    t.commit().unwrap();
    t.clear();

    // No add_scalar this event: the previous value is committed again.
    t.commit().unwrap();

    assert_eq!(t.sink().scalar_values("w").unwrap(), &[5.0, 5.0]);
}

#[test]
fn test_photon_backfill_scenario() {
    let mut t = table();
    for value in [1.0, 2.0, 3.0] {
        t.add_scalar("x", value).unwrap();
        t.commit().unwrap();
        t.clear();
    }

    let photon = FourMomentum::new(10.0, 0.5, 1.0, 0.0);
    t.add_photon("ph", photon).unwrap();
    t.commit().unwrap();

    let sink = t.sink();
    // The scalar slot persists, so the fourth row repeats the last value.
    assert_eq!(sink.scalar_values("x").unwrap(), &[1.0, 2.0, 3.0, 3.0]);
    let flat = |name: &str| -> Vec<f32> {
        sink.vector_values(name)
            .unwrap()
            .iter()
            .map(|row| row.first().copied().unwrap_or(0.0))
            .collect()
    };
    assert_eq!(flat("ph_pt"), vec![0.0, 0.0, 0.0, 10.0]);
    assert_eq!(flat("ph_eta"), vec![0.0, 0.0, 0.0, 0.5]);
    assert_eq!(flat("ph_phi"), vec![0.0, 0.0, 0.0, 1.0]);
    // The backfilled rows hold empty slices, not zero-filled ones.
    assert!(sink.vector_values("ph_pt").unwrap()[0].is_empty());
}

#[test]
fn test_missed_clear_is_detected() {
    let mut t = table();
    t.add_vector("v", &[1.0]).unwrap();
    t.commit().unwrap();

    let err = t.add_vector("v", &[2.0]).unwrap_err();
    assert!(matches!(err, TableError::StaleRowBuffer));

    // clear() recovers the table.
    t.clear();
    t.add_vector("v", &[2.0]).unwrap();
    t.commit().unwrap();
    assert_eq!(t.row_count(), 2);
}

#[test]
fn test_scalar_vector_name_collision() {
    let mut t = table();
    t.add_scalar("v", 1.0).unwrap();
    let err = t.add_vector("v", &[1.0]).unwrap_err();
    assert!(matches!(err, TableError::NameCollision { .. }));
}

#[test]
fn test_cross_kind_group_collision() {
    let mut t = table();
    t.declare_photon_group("obj").unwrap();
    let err = t.declare_jet_group("obj").unwrap_err();
    match err {
        TableError::NameCollision { name, existing } => {
            assert_eq!(name, "obj_pt");
            assert_eq!(existing, "photon group");
        }
        other => panic!("expected NameCollision, got {other:?}"),
    }
}

#[test]
fn test_collision_does_not_half_create_group() {
    let mut t = table();
    t.add_vector("g_pt", &[1.0]).unwrap();
    assert!(t.declare_jet_group("g").is_err());
    // None of the other member columns were created by the failed declare.
    assert!(t.sink().vector_values("g_eta").is_none());
}

#[test]
fn test_stats() {
    let mut t = table();
    t.add_scalar("w", 1.0).unwrap();
    t.add_vector("v", &[1.0]).unwrap();
    t.declare_jet_group("jets").unwrap();
    t.declare_truth_group("tp").unwrap();
    t.commit().unwrap();

    let stats = t.stats();
    assert_eq!(stats.rows_committed, 1);
    assert_eq!(stats.scalar_columns, 1);
    assert_eq!(stats.vector_columns, 1);
    assert_eq!(stats.groups_declared, 2);
    // 1 scalar + 1 vector + 4 jet fields + 6 truth fields
    assert_eq!(stats.columns, 12);
}

#[test]
fn test_underfilled_sink_commit_errors() {
    // Driving the sink directly without the table's flush must be caught.
    let mut sink = MemorySink::new();
    let a = sink.declare_column("a").unwrap();
    sink.declare_column("b").unwrap();
    sink.append(a, 1.0).unwrap();

    let err = sink.commit_row().unwrap_err();
    assert!(matches!(err, SinkError::RowLengthMismatch { .. }));
}

//! Tests for the constraint variants.

use super::*;
use crate::model::ModelBuilder;
use rota_core::test_utils::{people, tasks};

fn base(people_ids: &[&str], task_ids: &[&str], horizon: usize) -> LinearModel {
    ModelBuilder::new(&tasks(task_ids), &people(people_ids), horizon)
        .unwrap()
        .build()
}

#[test]
fn test_blocks_partition_horizon() {
    let got: Vec<_> = blocks(7, 3).collect();
    assert_eq!(got, vec![0..3, 3..6, 6..7]);

    let got: Vec<_> = blocks(6, 3).collect();
    assert_eq!(got, vec![0..3, 3..6]);

    assert_eq!(blocks(0, 3).count(), 0);
    assert_eq!(blocks(2, 0).count(), 2);
}

#[test]
fn test_partner_block_len() {
    assert_eq!(partner_block_len(4), 3);
    assert_eq!(partner_block_len(6), 5);
    assert_eq!(partner_block_len(1), 1);
}

#[test]
fn test_strict_rows_with_partial_task_block() {
    let mut model = base(&["A", "B", "C", "D"], &["T1", "T2"], 3);
    Variant::Strict.apply(&mut model);

    // Blocks 0..2 (full) and 2..3 (partial), 4 people x 2 tasks each.
    let rotation: Vec<_> = model.rows_of(RowKind::TaskRotation).collect();
    assert_eq!(rotation.len(), 16);
    let eq = rotation.iter().filter(|r| r.cmp == Comparison::Eq).count();
    let le = rotation.iter().filter(|r| r.cmp == Comparison::Le).count();
    assert_eq!((eq, le), (8, 8));
    assert!(rotation.iter().all(|r| r.rhs == 1.0));

    // One partner block of three periods over six pairs.
    let partner: Vec<_> = model.rows_of(RowKind::PartnerRotation).collect();
    assert_eq!(partner.len(), 6);
    assert!(partner
        .iter()
        .all(|r| r.cmp == Comparison::Le && r.rhs == 2.0 && r.vars.len() == 3 * 2));

    assert!(model.objective().is_empty());
}

#[test]
fn test_strict_partner_blocks_include_partial() {
    let mut model = base(&["A", "B", "C", "D"], &["T1", "T2"], 4);
    Variant::Strict.apply(&mut model);

    // Partner blocks 0..3 and 3..4.
    let partner: Vec<_> = model.rows_of(RowKind::PartnerRotation).collect();
    assert_eq!(partner.len(), 12);
    assert_eq!(partner.iter().filter(|r| r.vars.len() == 2).count(), 6);
}

#[test]
fn test_share_cap() {
    assert_eq!(share_cap(10, 2, 0.3), 6.0);
    assert_eq!(share_cap(3, 2, 0.3), 1.0);
    assert_eq!(share_cap(4, 2, 0.5), 4.0);
    assert_eq!(share_cap(1, 1, 0.3), 0.0);
}

#[test]
fn test_relaxed_rows() {
    let mut model = base(&["A", "B", "C", "D"], &["T1", "T2"], 3);
    Variant::relaxed().apply(&mut model);

    // Two consecutive period pairs.
    assert_eq!(model.rows_of(RowKind::NoRepeatTask).count(), 2 * 4 * 2);
    assert_eq!(model.rows_of(RowKind::NoRepeatPartner).count(), 2 * 6);

    let caps: Vec<_> = model.rows_of(RowKind::ShareCap).collect();
    assert_eq!(caps.len(), 4);
    // 30% of 6 task-slots.
    assert!(caps.iter().all(|r| r.cmp == Comparison::Le && r.rhs == 1.0));

    let mins: Vec<_> = model.rows_of(RowKind::MinParticipation).collect();
    assert_eq!(mins.len(), 4);
    assert!(mins.iter().all(|r| r.cmp == Comparison::Ge && r.rhs == 1.0));

    assert_eq!(model.rows_of(RowKind::TaskRotation).count(), 0);
}

#[test]
fn test_relaxed_single_period_has_no_repeat_rows() {
    let mut model = base(&["A", "B", "C", "D"], &["T1"], 1);
    Variant::relaxed().apply(&mut model);
    assert_eq!(model.rows_of(RowKind::NoRepeatTask).count(), 0);
    assert_eq!(model.rows_of(RowKind::NoRepeatPartner).count(), 0);
}

#[test]
fn test_balanced_rows_even_split() {
    let mut model = base(&["A", "B", "C", "D"], &["T1", "T2"], 6);
    Variant::Balanced.apply(&mut model);

    // 12 slots over 6 pairs, 6 periods over 2 tasks.
    let pairs: Vec<_> = model.rows_of(RowKind::PairBalance).collect();
    assert_eq!(pairs.len(), 6);
    assert!(pairs
        .iter()
        .all(|r| r.cmp == Comparison::Eq && r.rhs == 2.0 && r.vars.len() == 6 * 2));

    let tasks: Vec<_> = model.rows_of(RowKind::TaskBalance).collect();
    assert_eq!(tasks.len(), 4 * 2);
    assert!(tasks
        .iter()
        .all(|r| r.cmp == Comparison::Eq && r.rhs == 3.0 && r.vars.len() == 6 * 3));

    assert_eq!(model.rows_of(RowKind::TaskRotation).count(), 0);
    assert_eq!(model.rows_of(RowKind::PartnerRotation).count(), 0);
    assert!(model.objective().is_empty());
}

#[test]
fn test_balanced_rows_with_remainder() {
    let mut model = base(&["A", "B", "C", "D"], &["T1", "T2"], 5);
    Variant::Balanced.apply(&mut model);

    // 10 slots over 6 pairs: one or two each.
    let pairs: Vec<_> = model.rows_of(RowKind::PairBalance).collect();
    assert_eq!(pairs.len(), 12);
    assert_eq!(
        pairs
            .iter()
            .filter(|r| r.cmp == Comparison::Ge && r.rhs == 1.0)
            .count(),
        6
    );
    assert_eq!(
        pairs
            .iter()
            .filter(|r| r.cmp == Comparison::Le && r.rhs == 2.0)
            .count(),
        6
    );

    // 5 periods over 2 tasks: two or three each.
    let tasks: Vec<_> = model.rows_of(RowKind::TaskBalance).collect();
    assert_eq!(tasks.len(), 16);
    assert!(tasks.iter().all(|r| match r.cmp {
        Comparison::Ge => r.rhs == 2.0,
        Comparison::Le => r.rhs == 3.0,
        Comparison::Eq => false,
    }));
}

#[test]
fn test_random_costs_reproducible_and_in_range() {
    let a = random_costs(50, 7);
    let b = random_costs(50, 7);
    let c = random_costs(50, 8);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|cost| RANDOM_COST_RANGE.contains(cost)));
}

#[test]
fn test_randomized_adds_strict_rows_and_objective() {
    let mut strict = base(&["A", "B", "C", "D"], &["T1", "T2"], 4);
    Variant::Strict.apply(&mut strict);

    let mut randomized = base(&["A", "B", "C", "D"], &["T1", "T2"], 4);
    Variant::Randomized { seed: 3 }.apply(&mut randomized);

    assert_eq!(randomized.rows(), strict.rows());
    assert_eq!(randomized.objective().len(), randomized.variable_count());
}

#[test]
fn test_kind_and_fairness_requirement() {
    assert_eq!(Variant::Strict.kind(), VariantKind::Strict);
    assert_eq!(Variant::relaxed().kind(), VariantKind::Relaxed);
    assert_eq!(Variant::Randomized { seed: 0 }.kind(), VariantKind::Randomized);
    assert_eq!(Variant::Balanced.kind(), VariantKind::Balanced);

    assert!(Variant::Strict.requires_fairness());
    assert!(Variant::Randomized { seed: 0 }.requires_fairness());
    assert!(Variant::Balanced.requires_fairness());
    assert!(!Variant::relaxed().requires_fairness());

    assert_eq!(VariantKind::Relaxed.to_string(), "relaxed");
    assert_eq!(VariantKind::Balanced.to_string(), "balanced");
}

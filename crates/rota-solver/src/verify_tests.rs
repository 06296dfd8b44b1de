//! Tests for fairness verification.

use super::*;
use rota_core::test_utils::{pair, people, schedule};

#[test]
fn test_unmet_pairs_count_as_zero() {
    let s = schedule(&[&[("T1", "A", "B"), ("T2", "C", "D")]]);
    let report = FairnessVerifier::default().verify(&s, &people(&["A", "B", "C", "D"]));

    assert_eq!(report.counts.len(), 6);
    assert_eq!(report.counts[&pair("A", "B")], 1);
    assert_eq!(report.counts[&pair("A", "C")], 0);
    assert_eq!((report.min, report.max), (0, 1));
    assert_eq!(report.spread(), 1);
    assert!(report.is_fair());
}

#[test]
fn test_tolerance_boundary() {
    // A+B meets three times, everyone else never.
    let s = schedule(&[
        &[("T1", "A", "B")],
        &[("T1", "A", "B")],
        &[("T1", "A", "B")],
    ]);
    let roster = people(&["A", "B", "C"]);

    let report = FairnessVerifier::new(3).verify(&s, &roster);
    assert_eq!(report.spread(), 3);
    assert!(report.is_fair());

    let report = FairnessVerifier::new(2).verify(&s, &roster);
    assert!(!report.is_fair());
    assert_eq!(report.allowed_diff, 2);
}

#[test]
fn test_default_tolerance() {
    assert_eq!(FairnessVerifier::default().allowed_diff(), DEFAULT_ALLOWED_DIFF);
    assert_eq!(DEFAULT_ALLOWED_DIFF, 2);
}

#[test]
fn test_empty_schedule_is_fair() {
    let report = FairnessVerifier::new(0).verify(&schedule(&[]), &people(&["A", "B", "C"]));
    assert_eq!(report.spread(), 0);
    assert!(report.is_fair());
}

#[test]
fn test_display() {
    let s = schedule(&[&[("T1", "A", "B")]]);
    let report = FairnessVerifier::default().verify(&s, &people(&["A", "B", "C"]));
    assert_eq!(report.to_string(), "pair counts 0..1 (spread 1, allowed 2)");
}

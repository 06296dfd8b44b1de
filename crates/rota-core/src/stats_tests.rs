//! Tests for fairness statistics.

use crate::stats::{PairTally, ScheduleStats};
use crate::test_utils::{pair, people, schedule, tasks};
use crate::{PersonId, Schedule};

#[test]
fn test_tally_includes_unseen_pairs() {
    let s = schedule(&[&[("T1", "A", "B")], &[("T1", "B", "A")]]);
    let tally = PairTally::from_schedule(&s, &people(&["A", "B", "C"]));

    assert_eq!(tally.len(), 3);
    assert_eq!(tally.count(&pair("A", "B")), 2);
    assert_eq!(tally.count(&pair("A", "C")), 0);
    assert_eq!(tally.min(), 0);
    assert_eq!(tally.max(), 2);
}

#[test]
fn test_observed_tally_ignores_unseen_pairs() {
    let s = schedule(&[&[("T1", "A", "B")], &[("T1", "A", "C")]]);
    let tally = PairTally::observed(&s);

    assert_eq!(tally.len(), 2);
    assert_eq!(tally.spread(), 0);
}

#[test]
fn test_empty_tally() {
    let tally = PairTally::observed(&Schedule::default());
    assert!(tally.is_empty());
    assert_eq!(tally.spread(), 0);
}

#[test]
fn test_schedule_stats_histograms() {
    let s = schedule(&[
        &[("T1", "A", "B"), ("T2", "C", "D")],
        &[("T1", "C", "D"), ("T2", "A", "B")],
    ]);
    let stats = ScheduleStats::from_schedule(&s);
    let a = PersonId::from("A");

    assert_eq!(stats.task_count(&a, &"T1".into()), 1);
    assert_eq!(stats.task_count(&a, &"T2".into()), 1);
    assert_eq!(stats.partner_count(&a, &"B".into()), 2);
    assert_eq!(stats.partner_count(&a, &"C".into()), 0);
    assert_eq!(stats.load(&a), 2);
    assert_eq!(
        stats.task_spread(&people(&["A", "B", "C", "D"]), &tasks(&["T1", "T2"])),
        0
    );
}

#[test]
fn test_task_spread_counts_idle_people() {
    let s = schedule(&[&[("T1", "A", "B")]]);
    let stats = ScheduleStats::from_schedule(&s);
    assert_eq!(stats.task_spread(&people(&["A", "B", "C"]), &tasks(&["T1"])), 1);
}

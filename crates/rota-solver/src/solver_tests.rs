//! Tests for single-horizon solving and the randomized multi-start.

use super::*;
use crate::attempt::AttemptStatus;
use crate::backend::NoScheduleReason;
use crate::test_utils::{ExhaustiveBackend, FixedBackend};
use rota_config::{CategoryConfig, TaskConfig};
use rota_core::test_utils::{pair, people, tasks};
use rota_core::{PairTally, RotaError, ScheduleStats, TaskId};

fn solver(people_ids: &[&str], task_ids: &[&str]) -> RotationSolver {
    RotationSolver::new(people(people_ids), tasks(task_ids))
        .unwrap()
        .with_backend(Arc::new(ExhaustiveBackend))
}

fn four_by_two() -> RotationSolver {
    solver(&["A", "B", "C", "D"], &["T1", "T2"])
}

#[test]
fn test_empty_task_set_is_config_error() {
    let err = RotationSolver::new(people(&["A", "B", "C"]), Vec::new()).unwrap_err();
    assert!(err.is_config());
    assert!(err.attempts().is_empty());
}

#[test]
fn test_from_config_unknown_category() {
    let config = RotaConfig::default();
    let err = RotationSolver::from_config(&config, "garden").unwrap_err();
    assert!(matches!(
        err,
        SolveError::Domain(RotaError::UnknownCategory(name)) if name == "garden"
    ));
}

#[test]
fn test_from_config_empty_category() {
    let config = RotaConfig::default().with_category(CategoryConfig::new("garden", Vec::new()));
    let err = RotationSolver::from_config(&config, "garden").unwrap_err();
    assert!(matches!(err, SolveError::Domain(RotaError::EmptyTaskSet(_))));
}

#[test]
fn test_from_config_applies_settings() {
    let config = RotaConfig::default()
        .with_max_allowed_diff(1)
        .with_category(CategoryConfig::new(
            "garden",
            vec![TaskConfig::new("W1"), TaskConfig::new("W2")],
        ));
    let solver = RotationSolver::from_config(&config, "garden").unwrap();
    assert_eq!(solver.tasks(), tasks(&["W1", "W2"]).as_slice());
    assert_eq!(solver.people().len(), 6);
    assert_eq!(solver.verifier().allowed_diff(), 1);
}

#[test]
fn test_strict_schedule_rotates_tasks_and_partners() {
    let result = four_by_two().solve_strict(4).unwrap();
    let schedule = &result.solution.schedule;

    assert_eq!(result.horizon, 4);
    assert_eq!(result.variant, VariantKind::Strict);
    assert_eq!(schedule.horizon(), 4);
    assert!(schedule.validate(&tasks(&["T1", "T2"])).is_ok());

    // Every person does each task exactly once per two-period block.
    let roster = people(&["A", "B", "C", "D"]);
    for block in [0..2, 2..4] {
        let part = rota_core::Schedule::new(schedule.periods()[block].to_vec());
        let stats = ScheduleStats::from_schedule(&part);
        for person in &roster {
            for task in ["T1", "T2"] {
                assert_eq!(stats.task_count(person, &TaskId::from(task)), 1);
            }
        }
    }

    assert_eq!(result.solution.spread(), 2);
    assert!(result.solution.report.is_fair());
    assert_eq!(
        result.solution.report.counts,
        PairTally::from_schedule(schedule, &roster).into_counts()
    );
    assert_eq!(result.attempts.len(), 1);
    assert_eq!(result.attempts[0].status, AttemptStatus::Accepted);
}

#[test]
fn test_strict_first_periods() {
    let result = four_by_two().solve_strict(2).unwrap();
    let periods = result.solution.schedule.periods();
    let t1 = TaskId::from("T1");
    let t2 = TaskId::from("T2");
    assert_eq!(periods[0].get(&t1), Some(&pair("A", "B")));
    assert_eq!(periods[0].get(&t2), Some(&pair("C", "D")));
    assert_eq!(periods[1].get(&t1), Some(&pair("C", "D")));
    assert_eq!(periods[1].get(&t2), Some(&pair("A", "B")));
}

#[test]
fn test_infeasible_strict_is_exhausted() {
    let solver = solver(&["A", "B", "C", "D", "E"], &["T1", "T2"]);
    let err = solver.solve_strict(10).unwrap_err();

    assert!(!err.is_config());
    let attempts = err.attempts();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].horizon, 10);
    assert_eq!(attempts[0].variant, VariantKind::Strict);
    assert_eq!(attempts[0].status, AttemptStatus::NoSchedule);
    assert_eq!(attempts[0].spread, None);
}

#[test]
fn test_unfair_strict_is_exhausted() {
    let err = four_by_two()
        .with_allowed_diff(0)
        .solve_strict(4)
        .unwrap_err();
    assert_eq!(err.attempts()[0].status, AttemptStatus::Unfair { spread: 2 });
    assert_eq!(
        err.to_string(),
        "No fair schedule found; tried 4 strict: unfair (spread 2)"
    );
}

#[test]
fn test_broken_values_are_extraction_failures() {
    let solver = four_by_two().with_backend(Arc::new(FixedBackend(Outcome::Optimal(vec![
        0.0;
        12
    ]))));
    let attempt = solver.attempt(1, &Variant::Strict).unwrap();
    assert!(matches!(
        attempt.outcome,
        AttemptOutcome::Extraction(RotaError::Extraction { period: 0, found: 0, .. })
    ));
    assert_eq!(attempt.status(), AttemptStatus::Extraction);
    assert!(!attempt.is_accepted());

    let copy = attempt.clone();
    assert_eq!(copy, attempt);
    assert_eq!(copy.record(), attempt.record());
}

#[test]
fn test_no_schedule_reason_is_not_inspected() {
    for reason in [
        NoScheduleReason::Infeasible,
        NoScheduleReason::TimeLimit,
        NoScheduleReason::Solver("crashed".to_string()),
    ] {
        let solver = four_by_two().with_backend(Arc::new(FixedBackend(Outcome::NoSchedule(reason))));
        let attempt = solver.attempt(2, &Variant::Strict).unwrap();
        assert_eq!(attempt.outcome, AttemptOutcome::NoSchedule);
    }
}

#[test]
fn test_attempt_rejects_zero_horizon() {
    let err = four_by_two().attempt(0, &Variant::Strict).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_relaxed_waives_tolerance() {
    let solver = solver(&["A", "B", "C", "D", "E", "F"], &["T1", "T2"])
        .with_allowed_diff(0)
        .with_max_share(0.5);
    let result = solver.solve_relaxed(2).unwrap();

    assert_eq!(result.variant, VariantKind::Relaxed);
    assert_eq!(result.solution.spread(), 1);
    assert!(!result.solution.report.is_fair());
    assert_eq!(result.attempts[0].status, AttemptStatus::Accepted);
}

#[test]
fn test_relaxed_share_counts_task_slots() {
    let roster = ["A", "B", "C", "D", "E", "F"];

    // 30% of 4 task-slots caps everyone at one; six people cannot fill eight seats.
    let err = solver(&roster, &["T1"]).solve_relaxed(4).unwrap_err();
    assert_eq!(err.attempts()[0].status, AttemptStatus::NoSchedule);

    let result = solver(&roster, &["T1"])
        .with_max_share(0.5)
        .solve_relaxed(4)
        .unwrap();
    let stats = ScheduleStats::from_schedule(&result.solution.schedule);
    for person in people(&roster) {
        let load = stats.load(&person);
        assert!((1..=2).contains(&load), "{person} took {load} slots");
    }
}

#[test]
fn test_relaxed_infeasible() {
    let err = four_by_two().solve_relaxed(3).unwrap_err();
    assert_eq!(err.attempts()[0].variant, VariantKind::Relaxed);
    assert_eq!(err.attempts()[0].status, AttemptStatus::NoSchedule);
}

#[test]
fn test_five_people_two_tasks_relaxed_infeasible() {
    let solver = solver(&["A", "B", "C", "D", "E"], &["T1", "T2"]);
    let err = solver.solve_relaxed(10).unwrap_err();
    assert_eq!(err.attempts()[0].status, AttemptStatus::NoSchedule);
}

#[test]
fn test_balanced_even_split() {
    let result = four_by_two().with_allowed_diff(0).solve_balanced(6).unwrap();

    assert_eq!(result.variant, VariantKind::Balanced);
    assert_eq!(result.attempts[0].status, AttemptStatus::Accepted);
    assert!(result.solution.report.counts.values().all(|&c| c == 2));
    assert_eq!(result.solution.spread(), 0);

    let stats = ScheduleStats::from_schedule(&result.solution.schedule);
    for person in people(&["A", "B", "C", "D"]) {
        for task in ["T1", "T2"] {
            assert_eq!(stats.task_count(&person, &TaskId::from(task)), 3);
        }
    }
}

#[test]
fn test_balanced_within_one() {
    let result = four_by_two().solve_balanced(5).unwrap();
    let report = &result.solution.report;
    assert_eq!((report.min, report.max), (1, 2));

    let stats = ScheduleStats::from_schedule(&result.solution.schedule);
    for person in people(&["A", "B", "C", "D"]) {
        for task in ["T1", "T2"] {
            let count = stats.task_count(&person, &TaskId::from(task));
            assert!((2..=3).contains(&count), "{person} did {task} {count} times");
        }
    }
}

#[test]
fn test_balanced_meets_everyone_once() {
    let solver = solver(&["A", "B", "C", "D", "E", "F"], &["T1", "T2", "T3"]);
    let result = solver.solve_balanced(5).unwrap();
    assert_eq!(result.solution.report.counts.len(), 15);
    assert!(result.solution.report.counts.values().all(|&c| c == 1));
}

#[test]
fn test_balanced_infeasible() {
    // Three periods must use each pair once, which leaves someone without T1
    // or with it every period.
    let err = four_by_two().solve_balanced(3).unwrap_err();
    assert_eq!(err.attempts()[0].variant, VariantKind::Balanced);
    assert_eq!(err.attempts()[0].status, AttemptStatus::NoSchedule);
}

#[test]
fn test_randomized_keeps_lowest_spread() {
    let solver = four_by_two().with_allowed_diff(4);
    let result = solver.solve_randomized(6, 8, Some(7)).unwrap();

    assert_eq!(result.variant, VariantKind::Randomized);
    assert_eq!(result.attempts.len(), 8);
    let lowest = result
        .attempts
        .iter()
        .filter(|r| r.status == AttemptStatus::Accepted)
        .filter_map(|r| r.spread)
        .min();
    assert_eq!(Some(result.solution.spread()), lowest);
}

#[test]
fn test_randomized_is_reproducible_per_seed() {
    let solver = four_by_two().with_allowed_diff(4);
    let a = solver.solve_randomized(6, 4, Some(11)).unwrap();
    let b = solver.solve_randomized(6, 4, Some(11)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_randomized_all_unfair_is_exhausted() {
    let solver = four_by_two().with_allowed_diff(1);
    let err = solver.solve_randomized(4, 3, Some(1)).unwrap_err();

    let attempts = err.attempts();
    assert_eq!(attempts.len(), 3);
    assert!(attempts
        .iter()
        .all(|r| r.variant == VariantKind::Randomized
            && r.status == AttemptStatus::Unfair { spread: 2 }));
}

//! Test utilities for rota-core
//!
//! Provides common fixtures used across the workspace's test modules.

use crate::domain::{Pair, Period, PersonId, Roster, Schedule, TaskId};

/// Creates person ids from string slices.
pub fn people(ids: &[&str]) -> Vec<PersonId> {
    ids.iter().map(|id| PersonId::from(*id)).collect()
}

/// Creates task ids from string slices.
pub fn tasks(ids: &[&str]) -> Vec<TaskId> {
    ids.iter().map(|id| TaskId::from(*id)).collect()
}

/// Creates a roster from string slices.
///
/// # Panics
///
/// Panics if the ids do not form a valid roster.
pub fn roster(ids: &[&str]) -> Roster {
    Roster::from_ids(ids.iter().copied()).expect("valid test roster")
}

/// Creates a pair from two string slices.
///
/// # Panics
///
/// Panics if both ids are equal.
pub fn pair(a: &str, b: &str) -> Pair {
    Pair::new(a, b).expect("distinct test pair")
}

/// Builds a schedule from `(task, person, person)` rows per period.
///
/// # Example
///
/// ```
/// use rota_core::test_utils::schedule;
///
/// let s = schedule(&[
///     &[("T1", "A", "B")],
///     &[("T1", "A", "C")],
/// ]);
/// assert_eq!(s.horizon(), 2);
/// ```
pub fn schedule(periods: &[&[(&str, &str, &str)]]) -> Schedule {
    periods
        .iter()
        .map(|rows| {
            rows.iter()
                .map(|(task, a, b)| (TaskId::from(*task), pair(a, b)))
                .collect::<Period>()
        })
        .collect()
}

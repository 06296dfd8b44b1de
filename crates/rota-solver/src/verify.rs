//! Pair-count fairness verification.

use std::collections::BTreeMap;
use std::fmt;

use rota_core::{Pair, PairTally, PersonId, Schedule};

/// Default largest accepted `max - min` pair-count spread.
pub const DEFAULT_ALLOWED_DIFF: usize = 2;

/// Tally of one schedule against a spread tolerance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairnessReport {
    pub min: usize,
    pub max: usize,
    pub counts: BTreeMap<Pair, usize>,
    pub allowed_diff: usize,
}

impl FairnessReport {
    pub fn spread(&self) -> usize {
        self.max - self.min
    }

    pub fn is_fair(&self) -> bool {
        self.spread() <= self.allowed_diff
    }
}

impl fmt::Display for FairnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pair counts {}..{} (spread {}, allowed {})",
            self.min,
            self.max,
            self.spread(),
            self.allowed_diff
        )
    }
}

/// Checks that every pair in the roster meets about equally often.
///
/// The tally covers all pairs of `people`, so a pair that never works
/// together pulls the minimum to zero.
///
/// # Example
///
/// ```
/// use rota_core::test_utils::{people, schedule};
/// use rota_solver::FairnessVerifier;
///
/// let s = schedule(&[
///     &[("T1", "A", "B")],
///     &[("T1", "A", "C")],
///     &[("T1", "B", "C")],
/// ]);
/// let report = FairnessVerifier::new(0).verify(&s, &people(&["A", "B", "C"]));
/// assert_eq!((report.min, report.max), (1, 1));
/// assert!(report.is_fair());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FairnessVerifier {
    allowed_diff: usize,
}

impl Default for FairnessVerifier {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_DIFF)
    }
}

impl FairnessVerifier {
    pub fn new(allowed_diff: usize) -> Self {
        Self { allowed_diff }
    }

    pub fn allowed_diff(&self) -> usize {
        self.allowed_diff
    }

    pub fn verify(&self, schedule: &Schedule, people: &[PersonId]) -> FairnessReport {
        let tally = PairTally::from_schedule(schedule, people);
        FairnessReport {
            min: tally.min(),
            max: tally.max(),
            counts: tally.into_counts(),
            allowed_diff: self.allowed_diff,
        }
    }
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;

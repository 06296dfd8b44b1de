//! Results of single solving attempts.

use std::fmt;

use rota_core::{RotaError, Schedule};

use crate::variant::{Variant, VariantKind};
use crate::verify::FairnessReport;

/// An extracted schedule together with its fairness tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub schedule: Schedule,
    pub report: FairnessReport,
}

impl Solution {
    pub fn spread(&self) -> usize {
        self.report.spread()
    }
}

/// What one (horizon, variant) solve produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Solved(Solution),
    /// Infeasible, timed out, or the solver failed.
    NoSchedule,
    /// The solver answered but the values did not decode into a schedule.
    Extraction(RotaError),
}

/// One solve at one horizon under one variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub horizon: usize,
    pub variant: Variant,
    pub outcome: AttemptOutcome,
}

impl Attempt {
    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            AttemptOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self.outcome {
            AttemptOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Solved and within the spread tolerance.
    pub fn is_fair(&self) -> bool {
        self.solution().is_some_and(|s| s.report.is_fair())
    }

    /// Solved, and fair unless the variant waives the tolerance.
    pub fn is_accepted(&self) -> bool {
        self.solution()
            .is_some_and(|s| s.report.is_fair() || !self.variant.requires_fairness())
    }

    pub fn status(&self) -> AttemptStatus {
        match &self.outcome {
            AttemptOutcome::Solved(_) if self.is_accepted() => AttemptStatus::Accepted,
            AttemptOutcome::Solved(solution) => AttemptStatus::Unfair {
                spread: solution.spread(),
            },
            AttemptOutcome::NoSchedule => AttemptStatus::NoSchedule,
            AttemptOutcome::Extraction(_) => AttemptStatus::Extraction,
        }
    }

    pub fn record(&self) -> AttemptRecord {
        AttemptRecord {
            horizon: self.horizon,
            variant: self.variant.kind(),
            status: self.status(),
            spread: self.solution().map(Solution::spread),
        }
    }
}

/// Compact status of an attempt for logs and exhaustion reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Accepted,
    Unfair { spread: usize },
    NoSchedule,
    Extraction,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::Accepted => f.write_str("accepted"),
            AttemptStatus::Unfair { spread } => write!(f, "unfair (spread {spread})"),
            AttemptStatus::NoSchedule => f.write_str("no schedule"),
            AttemptStatus::Extraction => f.write_str("extraction error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    pub horizon: usize,
    pub variant: VariantKind,
    pub status: AttemptStatus,
    /// Pair-count spread when a schedule was extracted.
    pub spread: Option<usize>,
}

impl fmt::Display for AttemptRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.horizon, self.variant, self.status)
    }
}

//! Solved rotations.

use std::collections::{BTreeMap, HashSet};

use super::pair::Pair;
use super::person::PersonId;
use super::task::TaskId;
use crate::error::{Result, RotaError};

/// One period of a schedule: each task mapped to the pair doing it.
///
/// Tasks without an assignment are absent from the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Period {
    assignments: BTreeMap<TaskId, Pair>,
}

impl Period {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `pair` to `task`, returning the previous pair if any.
    pub fn assign(&mut self, task: TaskId, pair: Pair) -> Option<Pair> {
        self.assignments.insert(task, pair)
    }

    pub fn get(&self, task: &TaskId) -> Option<&Pair> {
        self.assignments.get(task)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TaskId, &Pair)> {
        self.assignments.iter()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskId> {
        self.assignments.keys()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the task a person does in this period, if any.
    pub fn task_of(&self, person: &PersonId) -> Option<&TaskId> {
        self.assignments
            .iter()
            .find(|(_, pair)| pair.contains(person))
            .map(|(task, _)| task)
    }

    /// Returns the first person appearing in more than one pair.
    pub fn double_booked(&self) -> Option<&PersonId> {
        let mut seen = HashSet::new();
        self.assignments
            .values()
            .flat_map(|pair| pair.members())
            .find(|person| !seen.insert(*person))
    }
}

impl FromIterator<(TaskId, Pair)> for Period {
    fn from_iter<I: IntoIterator<Item = (TaskId, Pair)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

/// An ordered sequence of periods.
///
/// Built once by extraction (or loaded by a persistence collaborator) and
/// treated as an immutable value afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schedule {
    periods: Vec<Period>,
}

impl Schedule {
    pub fn new(periods: Vec<Period>) -> Self {
        Self { periods }
    }

    /// Number of periods.
    pub fn horizon(&self) -> usize {
        self.periods.len()
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn period(&self, index: usize) -> Option<&Period> {
        self.periods.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Total number of (period, task) assignments.
    pub fn assignment_count(&self) -> usize {
        self.periods.iter().map(Period::len).sum()
    }

    /// Checks that every period assigns exactly the given tasks.
    pub fn check_coverage(&self, tasks: &[TaskId]) -> Result<()> {
        let expected: HashSet<&TaskId> = tasks.iter().collect();
        for (index, period) in self.periods.iter().enumerate() {
            if let Some(missing) = tasks.iter().find(|t| period.get(t).is_none()) {
                return Err(RotaError::InvalidSchedule(format!(
                    "period {index} has no pair for task {missing}"
                )));
            }
            if let Some(extra) = period.tasks().find(|t| !expected.contains(t)) {
                return Err(RotaError::InvalidSchedule(format!(
                    "period {index} assigns unknown task {extra}"
                )));
            }
        }
        Ok(())
    }

    /// Checks that nobody appears twice within one period.
    pub fn check_exclusivity(&self) -> Result<()> {
        for (index, period) in self.periods.iter().enumerate() {
            if let Some(person) = period.double_booked() {
                return Err(RotaError::InvalidSchedule(format!(
                    "{person} is assigned twice in period {index}"
                )));
            }
        }
        Ok(())
    }

    /// Runs both structural checks.
    pub fn validate(&self, tasks: &[TaskId]) -> Result<()> {
        self.check_coverage(tasks)?;
        self.check_exclusivity()
    }
}

impl FromIterator<Period> for Schedule {
    fn from_iter<I: IntoIterator<Item = Period>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

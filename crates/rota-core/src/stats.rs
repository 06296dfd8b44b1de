//! Derived fairness statistics.
//!
//! Everything here is recomputed from a `Schedule` on demand; nothing is
//! cached across schedules.

use std::collections::BTreeMap;

use crate::domain::{all_pairs, Pair, PersonId, Schedule, TaskId};

/// Co-occurrence count per pair.
///
/// # Example
///
/// ```
/// use rota_core::{PairTally, Pair, Period, Schedule, PersonId, TaskId};
///
/// let people: Vec<PersonId> = ["A", "B", "C"].into_iter().map(PersonId::from).collect();
/// let period: Period = [(TaskId::from("T1"), Pair::new("A", "B").unwrap())].into_iter().collect();
/// let schedule = Schedule::new(vec![period.clone(), period]);
///
/// let tally = PairTally::from_schedule(&schedule, &people);
/// assert_eq!(tally.count(&Pair::new("B", "A").unwrap()), 2);
/// assert_eq!(tally.min(), 0);
/// assert_eq!(tally.max(), 2);
/// assert_eq!(tally.spread(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairTally {
    counts: BTreeMap<Pair, usize>,
}

impl PairTally {
    /// Tallies every pair over `people`, including pairs that never meet.
    pub fn from_schedule(schedule: &Schedule, people: &[PersonId]) -> Self {
        let mut counts: BTreeMap<Pair, usize> =
            all_pairs(people).into_iter().map(|p| (p, 0)).collect();
        for period in schedule {
            for (_, pair) in period.iter() {
                *counts.entry(pair.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Tallies only the pairs that actually appear in the schedule.
    pub fn observed(schedule: &Schedule) -> Self {
        Self::from_schedule(schedule, &[])
    }

    pub fn count(&self, pair: &Pair) -> usize {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<Pair, usize> {
        &self.counts
    }

    pub fn into_counts(self) -> BTreeMap<Pair, usize> {
        self.counts
    }

    /// Smallest count, 0 for an empty tally.
    pub fn min(&self) -> usize {
        self.counts.values().copied().min().unwrap_or(0)
    }

    /// Largest count, 0 for an empty tally.
    pub fn max(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// `max - min`.
    pub fn spread(&self) -> usize {
        self.max() - self.min()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Per-person histograms of tasks done and partners worked with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub tasks: BTreeMap<PersonId, BTreeMap<TaskId, usize>>,
    pub partners: BTreeMap<PersonId, BTreeMap<PersonId, usize>>,
}

impl ScheduleStats {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut stats = Self::default();
        for period in schedule {
            for (task, pair) in period.iter() {
                for person in pair.members() {
                    *stats
                        .tasks
                        .entry(person.clone())
                        .or_default()
                        .entry(task.clone())
                        .or_insert(0) += 1;
                    if let Some(partner) = pair.partner_of(person) {
                        *stats
                            .partners
                            .entry(person.clone())
                            .or_default()
                            .entry(partner.clone())
                            .or_insert(0) += 1;
                    }
                }
            }
        }
        stats
    }

    pub fn task_count(&self, person: &PersonId, task: &TaskId) -> usize {
        self.tasks
            .get(person)
            .and_then(|m| m.get(task))
            .copied()
            .unwrap_or(0)
    }

    pub fn partner_count(&self, person: &PersonId, partner: &PersonId) -> usize {
        self.partners
            .get(person)
            .and_then(|m| m.get(partner))
            .copied()
            .unwrap_or(0)
    }

    /// Total assignments of one person across all tasks.
    pub fn load(&self, person: &PersonId) -> usize {
        self.tasks
            .get(person)
            .map(|m| m.values().sum())
            .unwrap_or(0)
    }

    /// Spread of per-(person, task) counts over the given people and tasks.
    pub fn task_spread(&self, people: &[PersonId], tasks: &[TaskId]) -> usize {
        let counts = people
            .iter()
            .flat_map(|p| tasks.iter().map(move |t| self.task_count(p, t)));
        let (min, max) = counts.fold((usize::MAX, 0), |(lo, hi), c| (lo.min(c), hi.max(c)));
        if min == usize::MAX {
            0
        } else {
            max - min
        }
    }
}

//! Rota Core - Domain types for fair pair rotations
//!
//! This crate provides the vocabulary shared by the rest of the workspace:
//! - People, rosters and unordered pairs
//! - Tasks, categories and the category registry
//! - Schedules (period -> task -> pair) and their structural checks
//! - Derived fairness statistics (pair tallies, task histograms)

pub mod domain;
pub mod error;
pub mod stats;

#[cfg(test)]
mod stats_tests;

#[doc(hidden)]
pub mod test_utils;

pub use domain::{
    all_pairs, Category, Pair, Period, PeriodUnit, Person, PersonId, Roster, Schedule, Task,
    TaskId, TaskRegistry,
};
pub use error::{Result, RotaError};
pub use stats::{PairTally, ScheduleStats};

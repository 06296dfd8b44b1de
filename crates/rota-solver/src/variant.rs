//! Constraint variants layered on the base model.
//!
//! - **Strict**: perfect block rotation of tasks and partners
//! - **Relaxed**: no immediate repeats, a share cap and minimum participation
//! - **Randomized**: Strict plus a small random objective to diversify the
//!   returned vertex across repeated solves
//! - **Balanced**: whole-horizon targets instead of blocks; every pair works
//!   together, and every person does every task, an even share of the time
//!
//! Blocks partition the horizon into consecutive, non-overlapping windows. A
//! trailing task block shorter than the task count keeps only the upper bound
//! (each task at most once).
//!
//! Partner blocks bound shared tasks from above only. Meeting every other
//! person at least once per block is read as being on duty together, which
//! the task-rotation rows already force: a full task block puts everybody on
//! duty every period, and a full partner block is never shorter than one.

use std::fmt;
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{AssignmentSpace, Comparison, LinearModel, Row, RowKind};

/// Default fraction of all task-slots one person may take under Relaxed.
pub const DEFAULT_MAX_SHARE: f64 = 0.3;

/// Range the randomized objective coefficients are drawn from.
pub const RANDOM_COST_RANGE: Range<f64> = 0.01..0.05;

/// Most times two people may meet within one partner-rotation block.
const PARTNER_BLOCK_MAX: f64 = 2.0;

/// Variant name without parameters, for attempt records and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Strict,
    Relaxed,
    Randomized,
    Balanced,
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Strict => f.write_str("strict"),
            VariantKind::Relaxed => f.write_str("relaxed"),
            VariantKind::Randomized => f.write_str("randomized"),
            VariantKind::Balanced => f.write_str("balanced"),
        }
    }
}

/// A constraint recipe applied on top of coverage and exclusivity.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Strict,
    Relaxed { max_share: f64 },
    Randomized { seed: u64 },
    Balanced,
}

impl Variant {
    pub fn relaxed() -> Self {
        Variant::Relaxed {
            max_share: DEFAULT_MAX_SHARE,
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Strict => VariantKind::Strict,
            Variant::Relaxed { .. } => VariantKind::Relaxed,
            Variant::Randomized { .. } => VariantKind::Randomized,
            Variant::Balanced => VariantKind::Balanced,
        }
    }

    /// Whether results of this variant must pass the spread tolerance.
    pub fn requires_fairness(&self) -> bool {
        !matches!(self, Variant::Relaxed { .. })
    }

    /// Adds this variant's rows (and objective) to a base model.
    pub fn apply(&self, model: &mut LinearModel) {
        match self {
            Variant::Strict => {
                let rows = strict_rows(model.space());
                model.extend(rows);
            }
            Variant::Relaxed { max_share } => {
                let rows = relaxed_rows(model.space(), *max_share);
                model.extend(rows);
            }
            Variant::Randomized { seed } => {
                let rows = strict_rows(model.space());
                model.extend(rows);
                let costs = random_costs(model.variable_count(), *seed);
                model.set_objective(costs);
            }
            Variant::Balanced => {
                let rows = balanced_rows(model.space());
                model.extend(rows);
            }
        }
    }
}

/// Splits `0..horizon` into consecutive blocks of `len` periods.
///
/// The last block is shorter when `len` does not divide `horizon`.
pub fn blocks(horizon: usize, len: usize) -> impl Iterator<Item = Range<usize>> {
    let len = len.max(1);
    (0..horizon)
        .step_by(len)
        .map(move |start| start..(start + len).min(horizon))
}

/// Periods it takes one person to meet everyone else once.
pub fn partner_block_len(people: usize) -> usize {
    people.saturating_sub(1).max(1)
}

/// Task-rotation and partner-rotation rows.
pub fn strict_rows(space: &AssignmentSpace) -> Vec<Row> {
    let mut rows = Vec::new();
    let task_count = space.tasks().len();
    let people = space.people().len();

    // Within a task block every person does every task exactly once.
    for block in blocks(space.horizon(), task_count) {
        let full = block.len() == task_count;
        for person in 0..people {
            for task in 0..task_count {
                let vars = block
                    .clone()
                    .flat_map(|period| space.person_task_vars(person, period, task))
                    .collect();
                let cmp = if full { Comparison::Eq } else { Comparison::Le };
                rows.push(Row::new(RowKind::TaskRotation, vars, cmp, 1.0));
            }
        }
    }

    // Within a partner block no pair shares more than two tasks.
    for block in blocks(space.horizon(), partner_block_len(people)) {
        for pair in 0..space.pairs().len() {
            let vars = block
                .clone()
                .flat_map(|period| space.pair_period_vars(pair, period))
                .collect();
            rows.push(Row::new(
                RowKind::PartnerRotation,
                vars,
                Comparison::Le,
                PARTNER_BLOCK_MAX,
            ));
        }
    }

    rows
}

/// Most (period, task) assignments one person may take under Relaxed.
///
/// The horizon has `horizon * task_count` task-slots and the cap is a share
/// of those, not of the two seats each slot has.
pub fn share_cap(horizon: usize, task_count: usize, max_share: f64) -> f64 {
    let slots = horizon * task_count;
    (max_share * slots as f64).floor()
}

/// No-immediate-repeat, share-cap and minimum-participation rows.
pub fn relaxed_rows(space: &AssignmentSpace, max_share: f64) -> Vec<Row> {
    let mut rows = Vec::new();
    let horizon = space.horizon();
    let task_count = space.tasks().len();
    let people = space.people().len();

    for period in 0..horizon.saturating_sub(1) {
        // Same task on consecutive periods.
        for person in 0..people {
            for task in 0..task_count {
                let mut vars = space.person_task_vars(person, period, task);
                vars.extend(space.person_task_vars(person, period + 1, task));
                rows.push(Row::new(RowKind::NoRepeatTask, vars, Comparison::Le, 1.0));
            }
        }
        // Same partner on consecutive periods.
        for pair in 0..space.pairs().len() {
            let mut vars = space.pair_period_vars(pair, period);
            vars.extend(space.pair_period_vars(pair, period + 1));
            rows.push(Row::new(RowKind::NoRepeatPartner, vars, Comparison::Le, 1.0));
        }
    }

    let cap = share_cap(horizon, task_count, max_share);
    for person in 0..people {
        let vars: Vec<usize> = (0..horizon)
            .flat_map(|period| space.person_period_vars(person, period))
            .collect();
        rows.push(Row::new(RowKind::ShareCap, vars.clone(), Comparison::Le, cap));
        rows.push(Row::new(
            RowKind::MinParticipation,
            vars,
            Comparison::Ge,
            1.0,
        ));
    }

    rows
}

/// Rows holding `vars` at `total / parts`, or within one above it when the
/// division leaves a remainder.
fn even_share(kind: RowKind, vars: Vec<usize>, total: usize, parts: usize) -> Vec<Row> {
    let target = (total / parts) as f64;
    if total % parts == 0 {
        vec![Row::new(kind, vars, Comparison::Eq, target)]
    } else {
        vec![
            Row::new(kind, vars.clone(), Comparison::Ge, target),
            Row::new(kind, vars, Comparison::Le, target + 1.0),
        ]
    }
}

/// Whole-horizon pair and task balance rows.
///
/// Each pair takes `horizon * tasks / pairs` slots and each person does each
/// task `horizon / tasks` times, both rounded to a one-wide band when they do
/// not divide.
pub fn balanced_rows(space: &AssignmentSpace) -> Vec<Row> {
    let mut rows = Vec::new();
    let horizon = space.horizon();
    let task_count = space.tasks().len();
    let pair_count = space.pairs().len();

    for pair in 0..pair_count {
        let vars = (0..horizon)
            .flat_map(|period| space.pair_period_vars(pair, period))
            .collect();
        rows.extend(even_share(
            RowKind::PairBalance,
            vars,
            horizon * task_count,
            pair_count,
        ));
    }

    for person in 0..space.people().len() {
        for task in 0..task_count {
            let vars = (0..horizon)
                .flat_map(|period| space.person_task_vars(person, period, task))
                .collect();
            rows.extend(even_share(RowKind::TaskBalance, vars, horizon, task_count));
        }
    }

    rows
}

/// Independent uniform costs in `RANDOM_COST_RANGE`, reproducible per seed.
pub fn random_costs(count: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| rng.random_range(RANDOM_COST_RANGE))
        .collect()
}

#[cfg(test)]
#[path = "variant_tests.rs"]
mod tests;

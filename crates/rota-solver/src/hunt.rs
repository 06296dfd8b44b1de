//! Horizon search.
//!
//! When no horizon is given, the hunt tries candidate horizons until one
//! yields an accepted schedule:
//!
//! - **Stride** (default): Strict at each candidate in ascending order, first
//!   fair result wins; otherwise one Relaxed solve at the largest candidate.
//! - **Linear**: Strict at every horizon in range, lowest spread wins, no
//!   fallback.

use std::collections::BTreeSet;

use rota_config::{HuntConfig, HuntMode};
use tracing::info;

use crate::attempt::{Attempt, AttemptRecord, Solution};
use crate::error::SolveError;
use crate::solver::{RotationSolver, SolveResult};
use crate::variant::Variant;

/// Candidate horizons for a stride hunt, ascending.
///
/// Every multiple of `task_count` in `[min_horizon, max_horizon]` qualifies.
/// Stride-aligned multiples and in-range extras are preferred when
/// `max_attempts` forces a cut; remaining slots go to the smallest others.
///
/// # Example
///
/// ```
/// use rota_config::HuntConfig;
/// use rota_solver::candidate_horizons;
///
/// let hunt = HuntConfig::range(10, 30);
/// assert_eq!(candidate_horizons(&hunt, 3), vec![12, 15, 18, 20, 21, 24, 27, 30]);
/// assert_eq!(candidate_horizons(&HuntConfig::range(10, 14), 3), vec![12]);
/// ```
pub fn candidate_horizons(hunt: &HuntConfig, task_count: usize) -> Vec<usize> {
    let (min, max) = (hunt.min_horizon, hunt.max_horizon);
    if task_count == 0 || min > max {
        return Vec::new();
    }
    let stride = hunt.stride.max(1);

    let multiples: Vec<usize> = (min..=max).filter(|h| h % task_count == 0).collect();
    let mut preferred: BTreeSet<usize> = multiples
        .iter()
        .copied()
        .filter(|h| (h - min) % stride == 0)
        .collect();
    preferred.extend(hunt.extras.iter().copied().filter(|h| (min..=max).contains(h)));

    let mut kept: BTreeSet<usize> = preferred.iter().copied().take(hunt.max_attempts).collect();
    for h in multiples {
        if kept.len() >= hunt.max_attempts {
            break;
        }
        kept.insert(h);
    }
    kept.into_iter().collect()
}

/// Searches for a horizon that admits an accepted schedule.
///
/// # Example
///
/// ```no_run
/// use rota_config::HuntConfig;
/// use rota_core::test_utils::{people, tasks};
/// use rota_solver::{HorizonHunt, RotationSolver};
///
/// let solver = RotationSolver::new(people(&["A", "B", "C", "D"]), tasks(&["T1", "T2"])).unwrap();
/// let result = HorizonHunt::new(&solver, HuntConfig::range(2, 4)).run().unwrap();
/// assert!(result.solution.report.is_fair());
/// ```
#[derive(Debug, Clone)]
pub struct HorizonHunt<'a> {
    solver: &'a RotationSolver,
    config: HuntConfig,
}

impl<'a> HorizonHunt<'a> {
    pub fn new(solver: &'a RotationSolver, config: HuntConfig) -> Self {
        Self { solver, config }
    }

    pub fn config(&self) -> &HuntConfig {
        &self.config
    }

    /// Horizons a stride hunt tries, ascending.
    pub fn candidates(&self) -> Vec<usize> {
        candidate_horizons(&self.config, self.solver.tasks().len())
    }

    /// Runs the hunt in the configured mode.
    ///
    /// # Errors
    ///
    /// [`SolveError::Config`] for an invalid hunt range, and
    /// [`SolveError::Exhausted`] listing every attempt when nothing is
    /// accepted.
    pub fn run(&self) -> Result<SolveResult, SolveError> {
        self.config.validate()?;
        let result = match self.config.mode {
            HuntMode::Stride => self.run_stride(),
            HuntMode::Linear => self.run_linear(),
        };
        match &result {
            Ok(found) => info!(
                event = "hunt_end",
                found = true,
                horizon = found.horizon,
                variant = %found.variant,
                spread = found.solution.spread(),
                attempts = found.attempts.len(),
            ),
            Err(e) => info!(
                event = "hunt_end",
                found = false,
                attempts = e.attempts().len(),
            ),
        }
        result
    }

    fn run_stride(&self) -> Result<SolveResult, SolveError> {
        let candidates = self.candidates();
        info!(
            event = "hunt_start",
            mode = "stride",
            min = self.config.min_horizon,
            max = self.config.max_horizon,
            candidates = ?candidates,
        );

        let total = candidates.len() + 1;
        let mut records = Vec::with_capacity(total);
        for (index, &horizon) in candidates.iter().enumerate() {
            let attempt = self.logged_attempt(index + 1, total, horizon, &Variant::Strict)?;
            records.push(attempt.record());
            if attempt.is_accepted() {
                if let Some(solution) = attempt.into_solution() {
                    return Ok(accepted(horizon, &Variant::Strict, solution, records));
                }
            }
        }

        let horizon = candidates
            .last()
            .copied()
            .unwrap_or(self.config.max_horizon);
        let relaxed = self.solver.relaxed_variant();
        let attempt = self.logged_attempt(total, total, horizon, &relaxed)?;
        records.push(attempt.record());
        if attempt.is_accepted() {
            if let Some(solution) = attempt.into_solution() {
                return Ok(accepted(horizon, &relaxed, solution, records));
            }
        }

        Err(SolveError::Exhausted { attempts: records })
    }

    fn run_linear(&self) -> Result<SolveResult, SolveError> {
        let (min, max) = (self.config.min_horizon, self.config.max_horizon);
        info!(event = "hunt_start", mode = "linear", min, max);

        let total = max - min + 1;
        let mut records = Vec::with_capacity(total);
        let mut best: Option<(usize, Solution)> = None;
        for (index, horizon) in (min..=max).enumerate() {
            let attempt = self.logged_attempt(index + 1, total, horizon, &Variant::Strict)?;
            records.push(attempt.record());
            if !attempt.is_accepted() {
                continue;
            }
            if let Some(solution) = attempt.into_solution() {
                let better = best
                    .as_ref()
                    .map_or(true, |(_, b)| solution.spread() < b.spread());
                if better {
                    best = Some((horizon, solution));
                }
            }
        }

        match best {
            Some((horizon, solution)) => Ok(accepted(horizon, &Variant::Strict, solution, records)),
            None => Err(SolveError::Exhausted { attempts: records }),
        }
    }

    fn logged_attempt(
        &self,
        index: usize,
        total: usize,
        horizon: usize,
        variant: &Variant,
    ) -> Result<Attempt, SolveError> {
        info!(
            event = "attempt_start",
            attempt = index,
            total,
            horizon,
            variant = %variant.kind(),
        );
        let attempt = self.solver.attempt(horizon, variant)?;
        info!(
            event = "attempt_end",
            attempt = index,
            total,
            horizon,
            variant = %variant.kind(),
            status = %attempt.status(),
        );
        Ok(attempt)
    }
}

fn accepted(
    horizon: usize,
    variant: &Variant,
    solution: Solution,
    attempts: Vec<AttemptRecord>,
) -> SolveResult {
    SolveResult {
        horizon,
        variant: variant.kind(),
        solution,
        attempts,
    }
}

#[cfg(test)]
#[path = "hunt_tests.rs"]
mod tests;

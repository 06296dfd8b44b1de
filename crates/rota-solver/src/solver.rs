//! The rotation solver: one roster, one task set, many attempts.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rota_config::RotaConfig;
use rota_core::{PersonId, TaskId};
use tracing::info;

use crate::attempt::{Attempt, AttemptOutcome, AttemptRecord, Solution};
use crate::backend::{Outcome, SolverBackend, SolverInvocation};
use crate::error::SolveError;
use crate::extract::extract;
use crate::model::{validate_inputs, ModelBuilder};
use crate::variant::{Variant, VariantKind, DEFAULT_MAX_SHARE};
use crate::verify::FairnessVerifier;

/// An accepted schedule and the attempts that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    pub horizon: usize,
    pub variant: VariantKind,
    pub solution: Solution,
    pub attempts: Vec<AttemptRecord>,
}

/// Builds, solves, extracts and verifies rotation models.
///
/// Attempts run one after another and each builds a fresh model. The only
/// extra thread is the solver worker that enforces the time budget.
///
/// # Example
///
/// ```no_run
/// use rota_core::test_utils::{people, tasks};
/// use rota_solver::RotationSolver;
///
/// let solver = RotationSolver::new(people(&["A", "B", "C", "D"]), tasks(&["T1", "T2"])).unwrap();
/// let result = solver.solve_strict(4).unwrap();
/// assert_eq!(result.solution.schedule.horizon(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct RotationSolver {
    people: Vec<PersonId>,
    tasks: Vec<TaskId>,
    invocation: SolverInvocation,
    time_limit: Duration,
    relaxed_time_limit: Duration,
    verifier: FairnessVerifier,
    max_share: f64,
}

impl RotationSolver {
    /// Creates a solver with default limits and the `microlp` backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an empty task set, fewer than three
    /// people or duplicate ids. No solve is attempted.
    pub fn new(people: Vec<PersonId>, tasks: Vec<TaskId>) -> Result<Self, SolveError> {
        validate_inputs(&tasks, &people)?;
        Ok(Self {
            people,
            tasks,
            invocation: SolverInvocation::default(),
            time_limit: Duration::from_secs(30),
            relaxed_time_limit: Duration::from_secs(15),
            verifier: FairnessVerifier::default(),
            max_share: DEFAULT_MAX_SHARE,
        })
    }

    /// Creates a solver for one category of a validated configuration.
    pub fn from_config(config: &RotaConfig, category: &str) -> Result<Self, SolveError> {
        config.validate()?;
        let people = config.roster()?.ids();
        let tasks = config.registry()?.task_ids(category)?;
        Ok(Self::new(people, tasks)?
            .with_time_limit(config.time_limit())
            .with_relaxed_time_limit(config.relaxed_time_limit())
            .with_allowed_diff(config.solver.max_allowed_diff)
            .with_max_share(config.relaxed.max_share))
    }

    pub fn with_backend(mut self, backend: Arc<dyn SolverBackend>) -> Self {
        self.invocation = SolverInvocation::new(backend);
        self
    }

    /// Budget for Strict and Randomized solves.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Budget for Relaxed solves.
    pub fn with_relaxed_time_limit(mut self, limit: Duration) -> Self {
        self.relaxed_time_limit = limit;
        self
    }

    pub fn with_allowed_diff(mut self, allowed_diff: usize) -> Self {
        self.verifier = FairnessVerifier::new(allowed_diff);
        self
    }

    pub fn with_max_share(mut self, max_share: f64) -> Self {
        self.max_share = max_share;
        self
    }

    pub fn people(&self) -> &[PersonId] {
        &self.people
    }

    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    pub fn verifier(&self) -> &FairnessVerifier {
        &self.verifier
    }

    /// The Relaxed variant with the configured share cap.
    pub fn relaxed_variant(&self) -> Variant {
        Variant::Relaxed {
            max_share: self.max_share,
        }
    }

    fn time_limit_for(&self, variant: &Variant) -> Duration {
        match variant {
            Variant::Relaxed { .. } => self.relaxed_time_limit,
            _ => self.time_limit,
        }
    }

    /// Runs one solve and verifies whatever comes back.
    ///
    /// Infeasibility, time-outs and extraction failures are reported in the
    /// returned [`Attempt`]; only invalid inputs are errors.
    pub fn attempt(&self, horizon: usize, variant: &Variant) -> Result<Attempt, SolveError> {
        let mut model = ModelBuilder::new(&self.tasks, &self.people, horizon)?.build();
        variant.apply(&mut model);
        let model = Arc::new(model);

        info!(
            event = "solve_start",
            horizon,
            variant = %variant.kind(),
            variables = model.variable_count(),
            rows = model.row_count(),
        );
        let started = Instant::now();

        let outcome = match self
            .invocation
            .run(Arc::clone(&model), self.time_limit_for(variant))
        {
            Outcome::Optimal(values) => match extract(model.space(), &values) {
                Ok(schedule) => {
                    let report = self.verifier.verify(&schedule, &self.people);
                    AttemptOutcome::Solved(Solution { schedule, report })
                }
                Err(e) => AttemptOutcome::Extraction(e),
            },
            Outcome::NoSchedule(_) => AttemptOutcome::NoSchedule,
        };

        let attempt = Attempt {
            horizon,
            variant: variant.clone(),
            outcome,
        };
        info!(
            event = "solve_end",
            horizon,
            variant = %variant.kind(),
            status = %attempt.status(),
            spread = attempt.solution().map(Solution::spread),
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok(attempt)
    }

    /// Single Strict solve at a fixed horizon.
    ///
    /// # Errors
    ///
    /// [`SolveError::Exhausted`] when the solve fails or the result is not
    /// within the spread tolerance.
    pub fn solve_strict(&self, horizon: usize) -> Result<SolveResult, SolveError> {
        self.solve_once(horizon, &Variant::Strict)
    }

    /// Single Relaxed solve at a fixed horizon. No spread tolerance applies.
    pub fn solve_relaxed(&self, horizon: usize) -> Result<SolveResult, SolveError> {
        self.solve_once(horizon, &self.relaxed_variant())
    }

    /// Single Balanced solve at a fixed horizon: even pair counts and even
    /// task counts over the whole horizon, with no block structure.
    pub fn solve_balanced(&self, horizon: usize) -> Result<SolveResult, SolveError> {
        self.solve_once(horizon, &Variant::Balanced)
    }

    fn solve_once(&self, horizon: usize, variant: &Variant) -> Result<SolveResult, SolveError> {
        let attempt = self.attempt(horizon, variant)?;
        let record = attempt.record();
        if !attempt.is_accepted() {
            return Err(SolveError::Exhausted {
                attempts: vec![record],
            });
        }
        match attempt.into_solution() {
            Some(solution) => Ok(SolveResult {
                horizon,
                variant: variant.kind(),
                solution,
                attempts: vec![record],
            }),
            None => Err(SolveError::Exhausted {
                attempts: vec![record],
            }),
        }
    }

    /// Runs `iterations` randomized solves and keeps the lowest spread.
    ///
    /// Per-run objective seeds are drawn from `seed` (or OS entropy). Runs
    /// that fail or exceed the tolerance are skipped; ties keep the earlier
    /// run.
    pub fn solve_randomized(
        &self,
        horizon: usize,
        iterations: usize,
        seed: Option<u64>,
    ) -> Result<SolveResult, SolveError> {
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };

        let mut attempts = Vec::with_capacity(iterations);
        let mut best: Option<Solution> = None;
        for run in 1..=iterations {
            let run_seed: u64 = rng.random();
            let attempt = self.attempt(horizon, &Variant::Randomized { seed: run_seed })?;
            info!(
                event = "randomized_run",
                run,
                iterations,
                horizon,
                seed = run_seed,
                status = %attempt.status(),
                spread = attempt.solution().map(Solution::spread),
            );
            attempts.push(attempt.record());
            if !attempt.is_accepted() {
                continue;
            }
            if let Some(solution) = attempt.into_solution() {
                if best.as_ref().map_or(true, |b| solution.spread() < b.spread()) {
                    best = Some(solution);
                }
            }
        }

        match best {
            Some(solution) => Ok(SolveResult {
                horizon,
                variant: VariantKind::Randomized,
                solution,
                attempts,
            }),
            None => Err(SolveError::Exhausted { attempts }),
        }
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;

//! Solver backends and time-limited invocation.
//!
//! A backend turns a [`LinearModel`] into an [`Outcome`]. Only
//! [`Outcome::Optimal`] carries values; infeasibility, an exhausted time
//! budget and solver failures all collapse into [`Outcome::NoSchedule`], and
//! callers never branch on the reason.
//!
//! Attempts never overlap. A worker that outlives its budget is told to stop
//! through a shared flag; one that cannot stop in time is joined before the
//! next run starts.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, RecvTimeoutError};
use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use tracing::{debug, warn};

use crate::model::{Comparison, LinearModel};

/// Why no schedule came back. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoScheduleReason {
    Infeasible,
    TimeLimit,
    Solver(String),
}

impl fmt::Display for NoScheduleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoScheduleReason::Infeasible => f.write_str("infeasible"),
            NoScheduleReason::TimeLimit => f.write_str("time limit"),
            NoScheduleReason::Solver(msg) => write!(f, "solver: {msg}"),
        }
    }
}

/// Result of one solver run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Proven optimal; one value per indicator.
    Optimal(Vec<f64>),
    NoSchedule(NoScheduleReason),
}

impl Outcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, Outcome::Optimal(_))
    }
}

/// How long a cancelled worker gets to wind down before it is parked.
const CANCEL_GRACE: Duration = Duration::from_millis(200);

/// An integer feasibility solver.
pub trait SolverBackend: Send + Sync {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &LinearModel) -> Outcome;

    /// Solves `model`, returning early once `terminate` is set.
    ///
    /// The default ignores the flag. Backends that can stop mid-search
    /// should override it.
    fn solve_until(&self, model: &LinearModel, terminate: &AtomicBool) -> Outcome {
        let _ = terminate;
        self.solve(model)
    }
}

/// Pure-Rust branch and bound through `good_lp`'s `microlp` solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl SolverBackend for MicroLpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &LinearModel) -> Outcome {
        let mut vars = ProblemVariables::new();
        let xs: Vec<Variable> = vars.add_vector(variable().binary(), model.variable_count());

        let objective: Expression = if model.objective().is_empty() {
            Expression::default()
        } else {
            model
                .objective()
                .iter()
                .zip(&xs)
                .map(|(&cost, &x)| cost * x)
                .sum()
        };

        let mut problem = vars.minimise(objective).using(microlp);
        for row in model.rows() {
            let lhs: Expression = row.vars.iter().map(|&v| xs[v]).sum();
            let rhs = row.rhs;
            problem.add_constraint(match row.cmp {
                Comparison::Eq => constraint!(lhs == rhs),
                Comparison::Le => constraint!(lhs <= rhs),
                Comparison::Ge => constraint!(lhs >= rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => Outcome::Optimal(xs.iter().map(|&x| solution.value(x)).collect()),
            Err(ResolutionError::Infeasible) => Outcome::NoSchedule(NoScheduleReason::Infeasible),
            Err(e) => Outcome::NoSchedule(NoScheduleReason::Solver(e.to_string())),
        }
    }
}

/// Runs a backend under a wall-clock budget.
///
/// The backend runs on a worker thread; the caller waits on a channel for at
/// most the budget. On time-out the worker's terminate flag is raised and it
/// gets [`CANCEL_GRACE`] to return. A backend that ignores the flag keeps
/// running, and the next [`run`](Self::run) waits for it before starting, so
/// at most one worker is ever alive per invocation.
#[derive(Clone)]
pub struct SolverInvocation {
    backend: Arc<dyn SolverBackend>,
    straggler: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Default for SolverInvocation {
    fn default() -> Self {
        Self::new(Arc::new(MicroLpBackend))
    }
}

impl fmt::Debug for SolverInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverInvocation")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl SolverInvocation {
    pub fn new(backend: Arc<dyn SolverBackend>) -> Self {
        Self {
            backend,
            straggler: Arc::new(Mutex::new(None)),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Solves `model`, giving up after `time_limit`.
    pub fn run(&self, model: Arc<LinearModel>, time_limit: Duration) -> Outcome {
        self.finish_pending();

        let (tx, rx) = channel::bounded(1);
        let terminate = Arc::new(AtomicBool::new(false));
        let backend = Arc::clone(&self.backend);
        let flag = Arc::clone(&terminate);
        let started = Instant::now();

        let spawned = thread::Builder::new()
            .name("rota-solve".to_string())
            .spawn(move || {
                let outcome = backend.solve_until(&model, &flag);
                // The receiver is gone when the caller already timed out.
                let _ = tx.send(outcome);
            });
        let handle = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                return Outcome::NoSchedule(NoScheduleReason::Solver(format!(
                    "failed to start solver thread: {e}"
                )))
            }
        };

        match rx.recv_timeout(time_limit) {
            Ok(outcome) => {
                let _ = handle.join();
                debug!(
                    backend = self.backend.name(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    optimal = outcome.is_optimal(),
                    "solver returned"
                );
                outcome
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!(
                    backend = self.backend.name(),
                    limit_secs = time_limit.as_secs_f64(),
                    "solver time limit reached"
                );
                terminate.store(true, Ordering::SeqCst);
                match rx.recv_timeout(CANCEL_GRACE) {
                    Err(RecvTimeoutError::Timeout) => {
                        warn!(
                            backend = self.backend.name(),
                            "solver worker still running; next run waits for it"
                        );
                        self.park(handle);
                    }
                    // Finished after all; the late result is dropped.
                    _ => {
                        let _ = handle.join();
                    }
                }
                Outcome::NoSchedule(NoScheduleReason::TimeLimit)
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = handle.join();
                Outcome::NoSchedule(NoScheduleReason::Solver(
                    "solver thread exited without a result".to_string(),
                ))
            }
        }
    }

    /// Blocks until a worker left over from a timed-out run has exited.
    pub fn finish_pending(&self) {
        let pending = match self.straggler.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = pending {
            let waited = Instant::now();
            let _ = handle.join();
            debug!(
                backend = self.backend.name(),
                waited_ms = waited.elapsed().as_millis() as u64,
                "joined leftover solver worker"
            );
        }
    }

    /// Whether a timed-out worker is still parked.
    pub fn has_pending(&self) -> bool {
        match self.straggler.lock() {
            Ok(slot) => slot.is_some(),
            Err(poisoned) => poisoned.into_inner().is_some(),
        }
    }

    fn park(&self, handle: JoinHandle<()>) {
        match self.straggler.lock() {
            Ok(mut slot) => *slot = Some(handle),
            Err(poisoned) => *poisoned.into_inner() = Some(handle),
        }
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;

//! Rota Solver - MILP rotation models and horizon search
//!
//! This crate turns a roster and a task set into fair two-person rotations:
//! - Model building (coverage and exclusivity over (period, task, pair) indicators)
//! - Constraint variants (Strict, Relaxed, Randomized, Balanced)
//! - Time-limited solver invocation behind a pluggable backend
//! - Extraction of solved values into schedules
//! - Pair-count fairness verification
//! - Horizon search with a Relaxed fallback
//!
//! # Example
//!
//! ```no_run
//! use rota_config::RotaConfig;
//! use rota_solver::{HorizonHunt, RotationSolver};
//!
//! let config = RotaConfig::default();
//! let solver = RotationSolver::from_config(&config, "kitchen").unwrap();
//! let result = HorizonHunt::new(&solver, config.hunt.clone()).run().unwrap();
//! println!("{} periods, {}", result.horizon, result.solution.report);
//! ```

pub mod attempt;
pub mod backend;
pub mod error;
pub mod extract;
pub mod hunt;
pub mod model;
pub mod solver;
pub mod variant;
pub mod verify;

#[cfg(test)]
pub mod test_utils;

pub use attempt::{Attempt, AttemptOutcome, AttemptRecord, AttemptStatus, Solution};
pub use backend::{MicroLpBackend, NoScheduleReason, Outcome, SolverBackend, SolverInvocation};
pub use error::SolveError;
pub use extract::{extract, is_selected, BINARY_THRESHOLD};
pub use hunt::{candidate_horizons, HorizonHunt};
pub use model::{AssignmentSpace, Comparison, LinearModel, ModelBuilder, Row, RowKind};
pub use solver::{RotationSolver, SolveResult};
pub use variant::{Variant, VariantKind, DEFAULT_MAX_SHARE};
pub use verify::{FairnessReport, FairnessVerifier, DEFAULT_ALLOWED_DIFF};

//! Rota - Fair Two-Person Chore Rotations
//!
//! Pick a category, and get back a schedule in which every task is done by a
//! pair each period, nobody works twice in one period, and every pair of
//! people meets about equally often.
//!
//! # Example
//!
//! ```no_run
//! use rota::prelude::*;
//!
//! let config = RotaConfig::default();
//! let plan = Planner::new(config).plan("kitchen", &PlanOptions::default()).unwrap();
//! println!("{} {}s, {}", plan.horizon, plan.unit, plan.report);
//! ```

pub use rota_config::{ConfigError, HuntConfig, HuntMode, RotaConfig};
pub use rota_core::{
    Category, Pair, PairTally, Period, PeriodUnit, PersonId, RotaError, Roster, Schedule,
    ScheduleStats, TaskId, TaskRegistry,
};
pub use rota_solver::{
    AttemptRecord, AttemptStatus, FairnessReport, HorizonHunt, RotationSolver, SolveError,
    SolveResult, SolverBackend, VariantKind,
};

mod planner;
pub mod store;

pub use planner::{Plan, PlanOptions, Planner};
pub use store::{StoreError, StoredRotation};

/// Installs the colored console layer.
#[cfg(feature = "console")]
pub use rota_console::init as init_console;

pub mod prelude {
    pub use super::{Plan, PlanOptions, Planner};
    pub use super::{HuntConfig, HuntMode, RotaConfig};
    pub use super::{Pair, PersonId, Schedule, TaskId};
    pub use super::{SolveError, VariantKind};
}

//! Entry point that maps a category and run options onto a solver path.

use std::path::Path;
use std::sync::Arc;

use rota_config::{ConfigError, RotaConfig};
use rota_core::{PeriodUnit, Schedule, ScheduleStats};
use rota_solver::{
    AttemptRecord, FairnessReport, HorizonHunt, RotationSolver, SolveError, SolveResult,
    SolverBackend, VariantKind,
};
use tracing::{debug, warn};

use crate::store::StoredRotation;

/// Per-run choices layered over the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    /// Solve at exactly this horizon instead of hunting.
    pub horizon: Option<usize>,
    /// Hunt for a horizon when none is given. When off, the category's
    /// default horizon is used.
    pub hunt: bool,
    /// Randomized best-of-N; overrides `randomized` in the configuration.
    pub randomized: Option<usize>,
    /// Seed for randomized objectives; overrides the configuration.
    pub seed: Option<u64>,
    /// Solve the whole-horizon balance model at a fixed horizon instead of
    /// block rotation.
    pub balanced: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            horizon: None,
            hunt: true,
            randomized: None,
            seed: None,
            balanced: false,
        }
    }
}

impl PlanOptions {
    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn without_hunt(mut self) -> Self {
        self.hunt = false;
        self
    }

    pub fn randomized(mut self, iterations: usize) -> Self {
        self.randomized = Some(iterations);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn balanced(mut self) -> Self {
        self.balanced = true;
        self
    }
}

/// An accepted schedule for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub category: String,
    pub unit: PeriodUnit,
    pub horizon: usize,
    pub variant: VariantKind,
    pub schedule: Schedule,
    pub report: FairnessReport,
    pub attempts: Vec<AttemptRecord>,
}

impl Plan {
    fn from_result(category: &str, unit: PeriodUnit, result: SolveResult) -> Self {
        Self {
            category: category.to_string(),
            unit,
            horizon: result.horizon,
            variant: result.variant,
            schedule: result.solution.schedule,
            report: result.solution.report,
            attempts: result.attempts,
        }
    }

    /// Per-person task and partner histograms.
    pub fn stats(&self) -> ScheduleStats {
        ScheduleStats::from_schedule(&self.schedule)
    }

    /// The persisted form: category label plus schedule.
    pub fn to_stored(&self) -> StoredRotation {
        StoredRotation::new(&self.category, self.schedule.clone())
    }
}

/// Runs one of four paths for a category:
///
/// - **Randomized**: best of N Strict solves with random objectives at a
///   fixed horizon (explicit or the category default)
/// - **Balanced**: one solve of the whole-horizon balance model at a fixed
///   horizon (explicit or the category default)
/// - **Fixed horizon**: one Strict solve, verified against the tolerance
/// - **Hunt**: horizon search per the configured mode
///
/// Unknown categories, empty task sets and malformed horizons fail before
/// any solve.
#[derive(Clone)]
pub struct Planner {
    config: RotaConfig,
    backend: Option<Arc<dyn SolverBackend>>,
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("config", &self.config)
            .field("backend", &self.backend.as_ref().map(|_| "<dyn SolverBackend>"))
            .finish()
    }
}

impl Planner {
    pub fn new(config: RotaConfig) -> Self {
        Self {
            config,
            backend: None,
        }
    }

    /// Loads and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] for a missing file, malformed TOML or an
    /// invalid value, so callers can report it before any solve.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = RotaConfig::load(path)?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Loads a TOML configuration, falling back to defaults if the file is
    /// missing or unreadable.
    ///
    /// A broken file is logged and otherwise ignored; use
    /// [`try_load`](Self::try_load) to surface it.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(planner) => planner,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::new(RotaConfig::default())
            }
        }
    }

    /// Replaces the `microlp` backend.
    pub fn with_backend(mut self, backend: Arc<dyn SolverBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn config(&self) -> &RotaConfig {
        &self.config
    }

    /// A solver for `category` carrying the configured limits.
    pub fn solver(&self, category: &str) -> Result<RotationSolver, SolveError> {
        let solver = RotationSolver::from_config(&self.config, category)?;
        Ok(match &self.backend {
            Some(backend) => solver.with_backend(Arc::clone(backend)),
            None => solver,
        })
    }

    pub fn plan(&self, category: &str, options: &PlanOptions) -> Result<Plan, SolveError> {
        let solver = self.solver(category)?;
        let registry = self.config.registry()?;
        let definition = registry.category(category)?;

        let iterations = options.randomized.or(self
            .config
            .randomized
            .enabled
            .then_some(self.config.randomized.iterations));
        let fixed = options.horizon.or(if options.hunt {
            None
        } else {
            definition.default_horizon
        });

        debug!(
            category,
            horizon = ?fixed,
            iterations = ?iterations,
            hunt = options.hunt,
            balanced = options.balanced,
            "planning"
        );

        let result = match (iterations, fixed) {
            (Some(_), _) if options.balanced => {
                return Err(ConfigError::Invalid(
                    "balanced and randomized solving cannot be combined".to_string(),
                )
                .into())
            }
            (Some(0), _) => {
                return Err(ConfigError::Invalid(
                    "randomized iterations must be at least 1".to_string(),
                )
                .into())
            }
            (Some(n), _) => {
                let horizon = fixed.or(definition.default_horizon).ok_or_else(|| {
                    ConfigError::Invalid(format!(
                        "randomized solving of '{category}' needs a horizon"
                    ))
                })?;
                let seed = options.seed.or(self.config.randomized.seed);
                solver.solve_randomized(horizon, n, seed)?
            }
            (None, _) if options.balanced => {
                let horizon = options
                    .horizon
                    .or(definition.default_horizon)
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!(
                            "balanced solving of '{category}' needs a horizon"
                        ))
                    })?;
                solver.solve_balanced(horizon)?
            }
            (None, Some(horizon)) => solver.solve_strict(horizon)?,
            (None, None) if options.hunt => {
                HorizonHunt::new(&solver, self.config.hunt.clone()).run()?
            }
            (None, None) => {
                return Err(ConfigError::Invalid(format!(
                    "no horizon for '{category}' and hunting is off"
                ))
                .into())
            }
        };

        Ok(Plan::from_result(category, definition.unit, result))
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;

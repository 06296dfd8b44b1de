//! Configuration system for rota.
//!
//! Load the roster, task categories and solver/hunt settings from TOML or
//! YAML files so rotations can be tuned without code changes. Every field has
//! a default; the defaults reproduce the household roster and categories the
//! scheduler was first written for.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use rota_config::{HuntMode, RotaConfig};
//! use std::time::Duration;
//!
//! let config = RotaConfig::from_toml_str(r#"
//!     [solver]
//!     time_limit_secs = 10
//!     max_allowed_diff = 1
//!
//!     [hunt]
//!     mode = "linear"
//!     min_horizon = 12
//!     max_horizon = 24
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_secs(10));
//! assert_eq!(config.hunt.mode, HuntMode::Linear);
//! assert_eq!(config.people.len(), 6);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use rota_config::RotaConfig;
//!
//! let config = RotaConfig::load("rota.toml").unwrap_or_default();
//! assert!(config.registry().unwrap().task_ids("kitchen").is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use rota_core::{Category, PeriodUnit, Person, RotaError, Roster, Task, TaskRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Domain(#[from] RotaError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main rota configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RotaConfig {
    /// People on the roster, in display order.
    pub people: Vec<PersonConfig>,

    /// Task categories.
    pub categories: Vec<CategoryConfig>,

    /// Solver invocation settings.
    pub solver: SolverSettings,

    /// Horizon search settings.
    pub hunt: HuntConfig,

    /// Randomized multi-start settings.
    pub randomized: RandomizedConfig,

    /// Relaxed fallback settings.
    pub relaxed: RelaxedConfig,
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            people: default_people(),
            categories: default_categories(),
            solver: SolverSettings::default(),
            hunt: HuntConfig::default(),
            randomized: RandomizedConfig::default(),
            relaxed: RelaxedConfig::default(),
        }
    }
}

impl RotaConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Replaces the roster with bare person ids.
    pub fn with_people<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.people = ids.into_iter().map(PersonConfig::new).collect();
        self
    }

    /// Adds a category.
    pub fn with_category(mut self, category: CategoryConfig) -> Self {
        self.categories.push(category);
        self
    }

    /// Sets the per-attempt solver time limit.
    pub fn with_time_limit_secs(mut self, seconds: u64) -> Self {
        self.solver.time_limit_secs = seconds;
        self
    }

    /// Sets the maximum allowed pair-count spread.
    pub fn with_max_allowed_diff(mut self, diff: usize) -> Self {
        self.solver.max_allowed_diff = diff;
        self
    }

    /// Sets the hunt configuration.
    pub fn with_hunt(mut self, hunt: HuntConfig) -> Self {
        self.hunt = hunt;
        self
    }

    /// Enables randomized solving with the given iteration count.
    pub fn with_randomized(mut self, iterations: usize) -> Self {
        self.randomized.enabled = true;
        self.randomized.iterations = iterations;
        self
    }

    /// Sets the seed used for randomized objectives.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.randomized.seed = Some(seed);
        self
    }

    /// Returns the per-attempt time limit for Strict and Randomized solves.
    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.solver.time_limit_secs)
    }

    /// Returns the time limit for the Relaxed fallback.
    pub fn relaxed_time_limit(&self) -> Duration {
        Duration::from_secs(self.solver.relaxed_time_limit_secs)
    }

    /// Builds the validated roster.
    pub fn roster(&self) -> Result<Roster, ConfigError> {
        let people = self.people.iter().map(PersonConfig::to_person).collect();
        Ok(Roster::new(people)?)
    }

    /// Builds the validated category registry.
    pub fn registry(&self) -> Result<TaskRegistry, ConfigError> {
        let mut registry = TaskRegistry::new();
        for category in &self.categories {
            registry.insert(category.to_category())?;
        }
        Ok(registry)
    }

    /// Checks numeric settings and builds the roster and registry once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.roster()?;
        self.registry()?;
        if self.solver.time_limit_secs == 0 || self.solver.relaxed_time_limit_secs == 0 {
            return Err(ConfigError::Invalid(
                "solver time limits must be positive".to_string(),
            ));
        }
        self.hunt.validate()?;
        if self.randomized.iterations == 0 {
            return Err(ConfigError::Invalid(
                "randomized.iterations must be at least 1".to_string(),
            ));
        }
        if !(self.relaxed.max_share > 0.0 && self.relaxed.max_share <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "relaxed.max_share must be in (0, 1], got {}",
                self.relaxed.max_share
            )));
        }
        Ok(())
    }
}

/// A person entry on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PersonConfig {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub symbol: Option<String>,
}

impl PersonConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            symbol: None,
        }
    }

    fn named(id: &str, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(id)
        }
    }

    pub fn to_person(&self) -> Person {
        let mut person = Person::new(self.id.clone());
        if let Some(name) = &self.name {
            person = person.with_name(name.clone());
        }
        if let Some(symbol) = &self.symbol {
            person = person.with_symbol(symbol.clone());
        }
        person
    }
}

/// Period length of a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnitConfig {
    #[default]
    Day,
    Week,
}

impl From<PeriodUnitConfig> for PeriodUnit {
    fn from(unit: PeriodUnitConfig) -> Self {
        match unit {
            PeriodUnitConfig::Day => PeriodUnit::Day,
            PeriodUnitConfig::Week => PeriodUnit::Week,
        }
    }
}

/// A task category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryConfig {
    pub name: String,

    /// Display title; defaults to the upper-cased name.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub unit: PeriodUnitConfig,

    /// Horizon used when no explicit horizon is given and hunting is off.
    #[serde(default)]
    pub default_horizon: Option<usize>,

    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

impl CategoryConfig {
    pub fn new(name: impl Into<String>, tasks: Vec<TaskConfig>) -> Self {
        Self {
            name: name.into(),
            label: None,
            unit: PeriodUnitConfig::Day,
            default_horizon: None,
            tasks,
        }
    }

    pub fn with_default_horizon(mut self, horizon: usize) -> Self {
        self.default_horizon = Some(horizon);
        self
    }

    pub fn with_unit(mut self, unit: PeriodUnitConfig) -> Self {
        self.unit = unit;
        self
    }

    pub fn to_category(&self) -> Category {
        let tasks = self.tasks.iter().map(TaskConfig::to_task).collect();
        let mut category = Category::new(self.name.clone(), tasks).with_unit(self.unit.into());
        if let Some(label) = &self.label {
            category = category.with_label(label.clone());
        }
        if let Some(horizon) = self.default_horizon {
            category = category.with_default_horizon(horizon);
        }
        category
    }
}

/// A task entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TaskConfig {
    pub id: String,

    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub short_description: Option<String>,
}

impl TaskConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: None,
            description: None,
            short_description: None,
        }
    }

    pub fn with_description(mut self, short: &str, description: &str) -> Self {
        self.short_description = Some(short.to_string());
        self.description = Some(description.to_string());
        self
    }

    pub fn to_task(&self) -> Task {
        let mut task = Task::new(self.id.clone());
        if let Some(symbol) = &self.symbol {
            task = task.with_symbol(symbol.clone());
        }
        if let Some(description) = &self.description {
            task = task.with_description(description.clone());
        }
        if let Some(short) = &self.short_description {
            task = task.with_short_description(short.clone());
        }
        task
    }
}

/// Solver invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverSettings {
    /// Wall-clock budget per Strict or Randomized attempt.
    pub time_limit_secs: u64,

    /// Wall-clock budget for the Relaxed fallback.
    pub relaxed_time_limit_secs: u64,

    /// Largest accepted `max - min` pair-count spread.
    pub max_allowed_diff: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: 30,
            relaxed_time_limit_secs: 15,
            max_allowed_diff: 2,
        }
    }
}

/// How candidate horizons are enumerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntMode {
    /// Stride multiples divisible by the task count, first fair result wins,
    /// Relaxed fallback at the largest candidate.
    #[default]
    Stride,

    /// Every horizon in range, lowest spread wins, no fallback.
    Linear,
}

/// Horizon search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct HuntConfig {
    pub mode: HuntMode,

    /// Smallest horizon considered.
    pub min_horizon: usize,

    /// Largest horizon considered.
    pub max_horizon: usize,

    /// Step between stride candidates, starting at `min_horizon`.
    pub stride: usize,

    /// Commonly useful horizons added when inside the range.
    pub extras: Vec<usize>,

    /// Cap on the number of stride candidates.
    pub max_attempts: usize,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            mode: HuntMode::Stride,
            min_horizon: 10,
            max_horizon: 30,
            stride: 5,
            extras: vec![15, 20, 30],
            max_attempts: 10,
        }
    }
}

impl HuntConfig {
    /// Creates a stride hunt over `[min, max]`.
    pub fn range(min_horizon: usize, max_horizon: usize) -> Self {
        Self {
            min_horizon,
            max_horizon,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: HuntMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_extras(mut self, extras: Vec<usize>) -> Self {
        self.extras = extras;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_horizon == 0 || self.min_horizon > self.max_horizon {
            return Err(ConfigError::Invalid(format!(
                "hunt range [{}, {}] is empty or starts at zero",
                self.min_horizon, self.max_horizon
            )));
        }
        if self.stride == 0 {
            return Err(ConfigError::Invalid("hunt.stride must be positive".to_string()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "hunt.max_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Randomized multi-start configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RandomizedConfig {
    /// Use the randomized solver instead of a single Strict solve.
    pub enabled: bool,

    /// Number of solves per batch.
    pub iterations: usize,

    /// Seed for the objective coefficients; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RandomizedConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            iterations: 5,
            seed: None,
        }
    }
}

/// Relaxed fallback configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RelaxedConfig {
    /// Largest fraction of all (period, task) slots one person may take.
    pub max_share: f64,
}

impl Default for RelaxedConfig {
    fn default() -> Self {
        Self { max_share: 0.3 }
    }
}

fn default_people() -> Vec<PersonConfig> {
    vec![
        PersonConfig::named("A", "Afonso"),
        PersonConfig::named("C", "Catarina"),
        PersonConfig::named("M", "Madalena"),
        PersonConfig::named("P", "Paula"),
        PersonConfig::named("D", "Deolinda"),
        PersonConfig::named("H", "Herculano"),
    ]
}

fn numbered(prefix: &str, count: usize) -> Vec<TaskConfig> {
    (1..=count)
        .map(|i| TaskConfig::new(format!("{prefix}{i}")))
        .collect()
}

fn default_categories() -> Vec<CategoryConfig> {
    let mut categories = vec![
        CategoryConfig::new(
            "kitchen",
            vec![
                TaskConfig::new("K1").with_description("Wash", "Wash the dishes"),
                TaskConfig::new("K2").with_description("Tidy", "Put dishes away and set the table"),
                TaskConfig::new("K3").with_description("Clean", "Clean the kitchen and the litter box"),
            ],
        )
        .with_default_horizon(18)
        .with_unit(PeriodUnitConfig::Week),
        CategoryConfig::new("clothing", numbered("C", 3)).with_unit(PeriodUnitConfig::Week),
        CategoryConfig::new("cats", numbered("G", 2)),
    ];
    for n in 3..=6 {
        categories.push(CategoryConfig::new(format!("test{n}"), numbered("T", n)));
    }
    categories
}

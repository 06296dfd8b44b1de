//! Tasks and task categories.

use std::fmt;

/// Opaque identifier of a task (e.g. `"K1"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A chore performed by one pair per period.
///
/// Symbol and descriptions are display metadata; the model only sees `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub symbol: String,
    pub description: String,
    pub short_description: String,
}

impl Task {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            short_description: id.clone(),
            description: String::new(),
            symbol: String::new(),
            id: TaskId(id),
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_short_description(mut self, short: impl Into<String>) -> Self {
        self.short_description = short.into();
        self
    }
}

/// Length of one period for a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    #[default]
    Day,
    Week,
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodUnit::Day => f.write_str("day"),
            PeriodUnit::Week => f.write_str("week"),
        }
    }
}

/// A named group of tasks scheduled together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Human-facing title; defaults to the upper-cased name.
    pub label: String,
    pub unit: PeriodUnit,
    /// Horizon used when the caller gives none and does not hunt.
    pub default_horizon: Option<usize>,
    pub tasks: Vec<Task>,
}

impl Category {
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        let name = name.into();
        Self {
            label: name.to_uppercase(),
            name,
            unit: PeriodUnit::Day,
            default_horizon: None,
            tasks,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_unit(mut self, unit: PeriodUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_default_horizon(mut self, horizon: usize) -> Self {
        self.default_horizon = Some(horizon);
        self
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id.clone()).collect()
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }
}

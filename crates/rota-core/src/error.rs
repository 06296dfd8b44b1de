//! Error types for rota

use thiserror::Error;

use crate::domain::TaskId;

/// Main error type for rota domain operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RotaError {
    /// Error in roster, registry or run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested category is not in the registry
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Category exists but declares no tasks
    #[error("No tasks defined for category '{0}'")]
    EmptyTaskSet(String),

    /// Two identical people were combined into a pair
    #[error("Invalid pair: {0} cannot be paired with itself")]
    InvalidPair(String),

    /// Schedule breaks coverage or exclusivity
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Solved values did not select exactly one pair for a slot
    #[error("Extraction error: period {period}, task {task} selected {found} pairs")]
    Extraction {
        period: usize,
        task: TaskId,
        found: usize,
    },
}

/// Result type alias for rota operations
pub type Result<T> = std::result::Result<T, RotaError>;

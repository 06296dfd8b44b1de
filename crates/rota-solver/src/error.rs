//! Error types for the rotation solver

use rota_config::ConfigError;
use rota_core::RotaError;
use thiserror::Error;

use crate::attempt::AttemptRecord;

/// Error returned by solver runs.
///
/// Infeasible or unfair attempts are not errors on their own; they surface
/// only through [`SolveError::Exhausted`] once nothing else is left to try.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Domain(#[from] RotaError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No fair schedule found; tried {}", list_attempts(.attempts))]
    Exhausted { attempts: Vec<AttemptRecord> },
}

impl SolveError {
    /// True for errors raised before any solve was attempted.
    pub fn is_config(&self) -> bool {
        matches!(self, SolveError::Domain(_) | SolveError::Config(_))
    }

    /// The attempts behind an exhaustion, empty otherwise.
    pub fn attempts(&self) -> &[AttemptRecord] {
        match self {
            SolveError::Exhausted { attempts } => attempts,
            _ => &[],
        }
    }
}

fn list_attempts(attempts: &[AttemptRecord]) -> String {
    if attempts.is_empty() {
        return "nothing".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

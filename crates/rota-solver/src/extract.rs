//! Reading solved indicator values back into a schedule.

use rota_core::{Period, RotaError, Schedule};

use crate::model::AssignmentSpace;

/// An indicator counts as selected when its value exceeds this.
pub const BINARY_THRESHOLD: f64 = 0.5;

#[inline]
pub fn is_selected(value: f64) -> bool {
    value > BINARY_THRESHOLD
}

/// Builds a schedule from one value per indicator.
///
/// Every (period, task) slot must select exactly one pair. A slot with none
/// or several is reported as [`RotaError::Extraction`]; nothing is patched.
/// The result is also checked for per-period exclusivity.
pub fn extract(space: &AssignmentSpace, values: &[f64]) -> Result<Schedule, RotaError> {
    if values.len() != space.len() {
        return Err(RotaError::InvalidSchedule(format!(
            "expected {} indicator values, got {}",
            space.len(),
            values.len()
        )));
    }

    let mut periods = Vec::with_capacity(space.horizon());
    for period in 0..space.horizon() {
        let mut assignments = Period::new();
        for (task, task_id) in space.tasks().iter().enumerate() {
            let selected: Vec<usize> = (0..space.pairs().len())
                .filter(|&pair| is_selected(values[space.var(period, task, pair)]))
                .collect();
            let [pair] = selected[..] else {
                return Err(RotaError::Extraction {
                    period,
                    task: task_id.clone(),
                    found: selected.len(),
                });
            };
            assignments.assign(task_id.clone(), space.pairs()[pair].clone());
        }
        periods.push(assignments);
    }

    let schedule = Schedule::new(periods);
    schedule.check_exclusivity()?;
    Ok(schedule)
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

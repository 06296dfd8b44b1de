//! Assignment model construction.
//!
//! The model is task-centric: one binary indicator per (period, task, pair),
//! laid out densely so an indicator is addressed by a single `usize`. Rows are
//! unit-coefficient linear constraints over those indicators, which is all the
//! rotation variants need.

use std::collections::HashSet;
use std::fmt;

use rota_core::{Pair, PersonId, RotaError, Roster, TaskId};

/// Relation between a row's sum and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Le,
    Ge,
}

/// Which rule a row encodes. Used for diagnostics and tests only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Coverage,
    Exclusivity,
    TaskRotation,
    PartnerRotation,
    NoRepeatTask,
    NoRepeatPartner,
    ShareCap,
    MinParticipation,
    PairBalance,
    TaskBalance,
}

/// `sum(vars) <cmp> rhs`, every coefficient being 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    pub vars: Vec<usize>,
    pub cmp: Comparison,
    pub rhs: f64,
}

impl Row {
    pub fn new(kind: RowKind, vars: Vec<usize>, cmp: Comparison, rhs: f64) -> Self {
        Self {
            kind,
            vars,
            cmp,
            rhs,
        }
    }

    /// Evaluates the row against a 0/1 assignment.
    pub fn is_satisfied_by(&self, selected: &[bool]) -> bool {
        let sum = self.vars.iter().filter(|&&v| selected[v]).count() as f64;
        match self.cmp {
            Comparison::Eq => sum == self.rhs,
            Comparison::Le => sum <= self.rhs,
            Comparison::Ge => sum >= self.rhs,
        }
    }
}

/// Indexing scheme of the (period, task, pair) indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentSpace {
    people: Vec<PersonId>,
    tasks: Vec<TaskId>,
    pairs: Vec<Pair>,
    /// Person indices of each pair.
    members: Vec<(usize, usize)>,
    /// Pair indices containing each person.
    pairs_of: Vec<Vec<usize>>,
    horizon: usize,
}

impl AssignmentSpace {
    fn new(people: &[PersonId], tasks: &[TaskId], horizon: usize) -> Self {
        let mut pairs = Vec::new();
        let mut members = Vec::new();
        let mut pairs_of = vec![Vec::new(); people.len()];
        for i in 0..people.len() {
            for j in i + 1..people.len() {
                // People are validated distinct by the builder.
                if let Ok(pair) = Pair::new(people[i].clone(), people[j].clone()) {
                    pairs_of[i].push(pairs.len());
                    pairs_of[j].push(pairs.len());
                    members.push((i, j));
                    pairs.push(pair);
                }
            }
        }
        Self {
            people: people.to_vec(),
            tasks: tasks.to_vec(),
            pairs,
            members,
            pairs_of,
            horizon,
        }
    }

    pub fn people(&self) -> &[PersonId] {
        &self.people
    }

    pub fn tasks(&self) -> &[TaskId] {
        &self.tasks
    }

    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Person indices of a pair.
    pub fn members(&self, pair: usize) -> (usize, usize) {
        self.members[pair]
    }

    /// Pair indices a person belongs to.
    pub fn pairs_of(&self, person: usize) -> &[usize] {
        &self.pairs_of[person]
    }

    /// Number of indicators.
    pub fn len(&self) -> usize {
        self.horizon * self.tasks.len() * self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the indicator for (period, task, pair).
    pub fn var(&self, period: usize, task: usize, pair: usize) -> usize {
        debug_assert!(period < self.horizon && task < self.tasks.len() && pair < self.pairs.len());
        (period * self.tasks.len() + task) * self.pairs.len() + pair
    }

    /// Indicators of `person` doing `task` in `period`.
    pub fn person_task_vars(&self, person: usize, period: usize, task: usize) -> Vec<usize> {
        self.pairs_of[person]
            .iter()
            .map(|&pair| self.var(period, task, pair))
            .collect()
    }

    /// Indicators of `person` doing any task in `period`.
    pub fn person_period_vars(&self, person: usize, period: usize) -> Vec<usize> {
        (0..self.tasks.len())
            .flat_map(|task| self.person_task_vars(person, period, task))
            .collect()
    }

    /// Indicators of `pair` working together in `period`, on any task.
    pub fn pair_period_vars(&self, pair: usize, period: usize) -> Vec<usize> {
        (0..self.tasks.len())
            .map(|task| self.var(period, task, pair))
            .collect()
    }
}

/// A complete linear feasibility model: indicators, rows, objective.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    space: AssignmentSpace,
    rows: Vec<Row>,
    /// Per-indicator cost; empty means the zero objective.
    objective: Vec<f64>,
}

impl LinearModel {
    pub fn space(&self) -> &AssignmentSpace {
        &self.space
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn variable_count(&self) -> usize {
        self.space.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows_of(&self, kind: RowKind) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |r| r.kind == kind)
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn extend(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
    }

    /// Replaces the zero objective with per-indicator costs.
    ///
    /// # Panics
    ///
    /// Panics if `costs` does not have one entry per indicator.
    pub fn set_objective(&mut self, costs: Vec<f64>) {
        assert_eq!(costs.len(), self.space.len(), "one cost per indicator");
        self.objective = costs;
    }

    /// Returns true if every row holds for the given 0/1 assignment.
    pub fn is_satisfied_by(&self, selected: &[bool]) -> bool {
        selected.len() == self.space.len() && self.rows.iter().all(|r| r.is_satisfied_by(selected))
    }
}

impl fmt::Display for LinearModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} periods x {} tasks x {} pairs ({} indicators, {} rows)",
            self.space.horizon,
            self.space.tasks.len(),
            self.space.pairs.len(),
            self.space.len(),
            self.rows.len()
        )
    }
}

/// Builds the variable scheme and the two universal hard constraints.
///
/// Inputs are validated up front: an empty task set, a roster under three
/// people, duplicate ids, or a zero horizon are configuration errors and no
/// model is produced.
///
/// # Example
///
/// ```
/// use rota_core::{PersonId, TaskId};
/// use rota_solver::model::{ModelBuilder, RowKind};
///
/// let people: Vec<PersonId> = ["A", "B", "C", "D"].into_iter().map(PersonId::from).collect();
/// let tasks = vec![TaskId::from("T1"), TaskId::from("T2")];
///
/// let model = ModelBuilder::new(&tasks, &people, 3).unwrap().build();
/// assert_eq!(model.variable_count(), 3 * 2 * 6);
/// assert_eq!(model.rows_of(RowKind::Coverage).count(), 3 * 2);
/// assert_eq!(model.rows_of(RowKind::Exclusivity).count(), 3 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    space: AssignmentSpace,
}

impl ModelBuilder {
    pub fn new(tasks: &[TaskId], people: &[PersonId], horizon: usize) -> Result<Self, RotaError> {
        validate_inputs(tasks, people)?;
        if horizon == 0 {
            return Err(RotaError::Config("horizon must be at least 1 period".to_string()));
        }
        Ok(Self {
            space: AssignmentSpace::new(people, tasks, horizon),
        })
    }

    pub fn space(&self) -> &AssignmentSpace {
        &self.space
    }

    /// Produces a model holding coverage and exclusivity rows.
    pub fn build(&self) -> LinearModel {
        let space = &self.space;
        let mut rows = Vec::new();

        // Every task is done by exactly one pair each period.
        for period in 0..space.horizon {
            for task in 0..space.tasks.len() {
                let vars = (0..space.pairs.len())
                    .map(|pair| space.var(period, task, pair))
                    .collect();
                rows.push(Row::new(RowKind::Coverage, vars, Comparison::Eq, 1.0));
            }
        }

        // Nobody does more than one task per period.
        for period in 0..space.horizon {
            for person in 0..space.people.len() {
                rows.push(Row::new(
                    RowKind::Exclusivity,
                    space.person_period_vars(person, period),
                    Comparison::Le,
                    1.0,
                ));
            }
        }

        LinearModel {
            space: space.clone(),
            rows,
            objective: Vec::new(),
        }
    }
}

/// Rejects task and people sets no model can be built from.
pub fn validate_inputs(tasks: &[TaskId], people: &[PersonId]) -> Result<(), RotaError> {
    if tasks.is_empty() {
        return Err(RotaError::Config("task set is empty".to_string()));
    }
    if people.len() < Roster::MIN_PEOPLE {
        return Err(RotaError::Config(format!(
            "at least {} people are needed, got {}",
            Roster::MIN_PEOPLE,
            people.len()
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = people.iter().find(|p| !seen.insert(*p)) {
        return Err(RotaError::Config(format!("duplicate person id '{dup}'")));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = tasks.iter().find(|t| !seen.insert(*t)) {
        return Err(RotaError::Config(format!("duplicate task id '{dup}'")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;

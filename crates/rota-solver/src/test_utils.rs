//! Test utilities for rota-solver
//!
//! Deterministic backends so solver, hunt and randomized tests do not depend
//! on which optimum a MILP solver happens to return.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::backend::{NoScheduleReason, Outcome, SolverBackend};
use crate::model::{Comparison, LinearModel, RowKind};
use crate::variant::VariantKind;

/// Which variant produced a model, judged from its rows and objective.
pub fn model_kind(model: &LinearModel) -> VariantKind {
    if model.rows_of(RowKind::ShareCap).next().is_some() {
        VariantKind::Relaxed
    } else if model.rows_of(RowKind::PairBalance).next().is_some() {
        VariantKind::Balanced
    } else if !model.objective().is_empty() {
        VariantKind::Randomized
    } else {
        VariantKind::Strict
    }
}

/// Depth-first search over (period, task) slots, one pair per slot.
///
/// Within a slot, pairs are tried in ascending objective cost (index order
/// for the zero objective), so randomized costs steer which schedule comes
/// back first. Only suitable for tiny models. Stops when terminated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveBackend;

impl SolverBackend for ExhaustiveBackend {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, model: &LinearModel) -> Outcome {
        self.solve_until(model, &AtomicBool::new(false))
    }

    fn solve_until(&self, model: &LinearModel, terminate: &AtomicBool) -> Outcome {
        let npairs = model.space().pairs().len();
        let slots = model.space().horizon() * model.space().tasks().len();
        let mut selected = vec![false; model.variable_count()];
        if search(model, &mut selected, 0, slots, npairs, terminate) {
            Outcome::Optimal(
                selected
                    .into_iter()
                    .map(|s| if s { 1.0 } else { 0.0 })
                    .collect(),
            )
        } else if terminate.load(Ordering::Relaxed) {
            Outcome::NoSchedule(NoScheduleReason::TimeLimit)
        } else {
            Outcome::NoSchedule(NoScheduleReason::Infeasible)
        }
    }
}

fn search(
    model: &LinearModel,
    selected: &mut [bool],
    slot: usize,
    slots: usize,
    npairs: usize,
    terminate: &AtomicBool,
) -> bool {
    if terminate.load(Ordering::Relaxed) {
        return false;
    }
    if slot == slots {
        return model.is_satisfied_by(selected);
    }
    let mut order: Vec<usize> = (0..npairs).collect();
    if !model.objective().is_empty() {
        let costs = &model.objective()[slot * npairs..(slot + 1) * npairs];
        order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));
    }
    for pair in order {
        let v = slot * npairs + pair;
        selected[v] = true;
        if consistent(model, selected, slot + 1, npairs)
            && search(model, selected, slot + 1, slots, npairs, terminate)
        {
            return true;
        }
        selected[v] = false;
    }
    false
}

/// Rows that can still be satisfied once the first `decided` slots are fixed.
fn consistent(model: &LinearModel, selected: &[bool], decided: usize, npairs: usize) -> bool {
    model.rows().iter().all(|row| {
        let count = row.vars.iter().filter(|&&v| selected[v]).count() as f64;
        let mut open_slots: Vec<usize> = row
            .vars
            .iter()
            .map(|&v| v / npairs)
            .filter(|&slot| slot >= decided)
            .collect();
        open_slots.sort_unstable();
        open_slots.dedup();
        let reachable = count + open_slots.len() as f64;
        match row.cmp {
            Comparison::Le => count <= row.rhs,
            Comparison::Eq => count <= row.rhs && reachable >= row.rhs,
            Comparison::Ge => reachable >= row.rhs,
        }
    })
}

/// Wraps [`ExhaustiveBackend`], refusing chosen models and recording calls.
pub struct ScriptedBackend {
    refuse: Box<dyn Fn(usize, VariantKind) -> bool + Send + Sync>,
    calls: Mutex<Vec<(usize, VariantKind)>>,
}

impl ScriptedBackend {
    /// Solves everything exhaustively.
    pub fn solving() -> Self {
        Self::refusing(|_, _| false)
    }

    /// Reports no schedule whenever `refuse(horizon, kind)` holds.
    pub fn refusing(refuse: impl Fn(usize, VariantKind) -> bool + Send + Sync + 'static) -> Self {
        Self {
            refuse: Box::new(refuse),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(horizon, variant)` of every model seen, in order.
    pub fn calls(&self) -> Vec<(usize, VariantKind)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SolverBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&self, model: &LinearModel) -> Outcome {
        self.solve_until(model, &AtomicBool::new(false))
    }

    fn solve_until(&self, model: &LinearModel, terminate: &AtomicBool) -> Outcome {
        let horizon = model.space().horizon();
        let kind = model_kind(model);
        self.calls.lock().unwrap().push((horizon, kind));
        if (self.refuse)(horizon, kind) {
            return Outcome::NoSchedule(NoScheduleReason::Infeasible);
        }
        ExhaustiveBackend.solve_until(model, terminate)
    }
}

/// Returns the same outcome for every model.
#[derive(Debug, Clone)]
pub struct FixedBackend(pub Outcome);

impl SolverBackend for FixedBackend {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn solve(&self, _model: &LinearModel) -> Outcome {
        self.0.clone()
    }
}

/// Sleeps before answering and ignores termination, to trip time limits.
#[derive(Debug, Clone, Copy)]
pub struct SlowBackend(pub Duration);

impl SolverBackend for SlowBackend {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn solve(&self, model: &LinearModel) -> Outcome {
        thread::sleep(self.0);
        ExhaustiveBackend.solve(model)
    }
}

//! Thread-local inference counters and their report DTOs.

use crate::obs::Outcome;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

thread_local! {
    static STATE: RefCell<CounterState> = RefCell::new(CounterState::default());
}

///
/// CounterState
///

#[derive(Debug, Default)]
struct CounterState {
    totals: OpCounters,
    ops: BTreeMap<String, OpCounters>,
}

fn with_state_mut<R>(f: impl FnOnce(&mut CounterState) -> R) -> R {
    STATE.with_borrow_mut(f)
}

///
/// OpCounters
/// Saturating outcome counters for one operation (or the totals row).
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OpCounters {
    pub narrowed: u64,
    pub opaque: u64,
    pub deferred: u64,
}

impl OpCounters {
    const fn bump(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Narrowed => self.narrowed = self.narrowed.saturating_add(1),
            Outcome::Opaque => self.opaque = self.opaque.saturating_add(1),
            Outcome::Deferred => self.deferred = self.deferred.saturating_add(1),
        }
    }

    /// Total inferences recorded in this row.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.narrowed
            .saturating_add(self.opaque)
            .saturating_add(self.deferred)
    }
}

///
/// InferenceReport
/// Point-in-time snapshot of precision counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InferenceReport {
    pub totals: OpCounters,
    pub ops: BTreeMap<String, OpCounters>,
}

pub(crate) fn record(op: &str, outcome: Outcome) {
    with_state_mut(|state| {
        state.totals.bump(outcome);
        state.ops.entry(op.to_string()).or_default().bump(outcome);
    });
}

pub(crate) fn report() -> InferenceReport {
    with_state_mut(|state| InferenceReport {
        totals: state.totals,
        ops: state.ops.clone(),
    })
}

pub(crate) fn reset() {
    with_state_mut(|state| *state = CounterState::default());
}

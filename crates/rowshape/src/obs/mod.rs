//! Observability: precision telemetry for inference outcomes.
//!
//! Inference itself is pure; counters live in thread-local state so
//! concurrent call-site analysis stays lock-free.

pub(crate) mod metrics;

use crate::output::InferenceResult;

// re-exports
pub use metrics::{InferenceReport, OpCounters};

///
/// Outcome
/// Classification of one finished inference.
///

#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    /// Narrowed to a concrete, non-opaque type.
    Narrowed,

    /// Narrowed, but only to an opaque/unknown-element type.
    Opaque,

    /// Deferred to the host's declared signature.
    Deferred,
}

/// Record the outcome of one projected inference for `op`.
pub(crate) fn record_outcome(op: &str, result: &InferenceResult) {
    let outcome = match result.narrowed() {
        None => Outcome::Deferred,
        Some(ty) if contains_unknown(ty) => Outcome::Opaque,
        Some(_) => Outcome::Narrowed,
    };

    metrics::record(op, outcome);
}

/// Record a deferral that happened before projection (missing shape or
/// unknown operation name).
pub(crate) fn record_deferred(op: &str) {
    metrics::record(op, Outcome::Deferred);
}

/// Snapshot current counters for endpoint/test plumbing.
#[must_use]
pub fn report() -> InferenceReport {
    metrics::report()
}

/// Reset all counters.
pub fn reset() {
    metrics::reset();
}

/// True when any part of the type is the opaque unknown value.
fn contains_unknown(ty: &crate::output::OutputType) -> bool {
    use crate::output::OutputType;

    match ty {
        OutputType::Unknown => true,
        OutputType::List(inner) | OutputType::Sequence(inner) | OutputType::Nullable(inner) => {
            contains_unknown(inner)
        }
        OutputType::Entity(_)
        | OutputType::Record(_)
        | OutputType::Scalar(_)
        | OutputType::AnyRecord
        | OutputType::Template(_) => false,
    }
}

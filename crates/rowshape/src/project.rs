//! The shape projector: hydration mode × result shape × cardinality wrapper
//! to an inferred output type.
//!
//! This module is the sole owner of the mode/shape rule table. Boundary
//! layers map call-site facts into [`ModeKnowledge`] and look up wrappers;
//! they must not redefine projection rules.

use crate::{
    mode::{HydrationMode, ModeKnowledge},
    op::CardinalityWrapper,
    output::{InferenceResult, OutputType},
    shape::{Projection, ResultShape, TemplateBound},
};


/// Project one resolved call site into an inferred result.
///
/// Total over the input domain: every unresolvable combination maps to
/// `Defer` or to an opaque element type, never to an error.
///
/// Object hydration is the only mode that does not re-encode rows, so it is
/// the only one that passes both entity and record shapes through unchanged.
/// Scalar-like modes re-encode and can only be narrowed when the encoding
/// is unambiguous (single-field projections).
#[must_use]
pub fn project(
    mode: ModeKnowledge,
    shape: &ResultShape,
    wrapper: CardinalityWrapper,
) -> InferenceResult {
    // An unconstrained template admits a void-like result; no concrete
    // shape may be assumed for any mode or wrapper.
    if let ResultShape::Template(template) = shape {
        if template.bound == TemplateBound::MaybeVoid {
            return InferenceResult::Defer;
        }
    }

    let element = element_type(mode, shape);

    InferenceResult::Narrowed(apply_wrapper(element, mode, wrapper))
}

/// First pass: element type from mode × shape, independent of the wrapper.
///
/// Template shapes reaching this point are `NonVoid`; the placeholder
/// passes through under object-preserving modes and degrades alongside the
/// entity column under re-encoding modes.
fn element_type(mode: ModeKnowledge, shape: &ResultShape) -> OutputType {
    let literal = match mode {
        ModeKnowledge::Literal(literal) => literal,
        // Every fixed default in the operation table is object-hydrating.
        ModeKnowledge::Default => HydrationMode::Object,
        ModeKnowledge::Unknown => return OutputType::Unknown,
    };

    match (literal, shape) {
        (HydrationMode::Object | HydrationMode::SimpleObject, ResultShape::Entity(entity)) => {
            OutputType::Entity(entity.clone())
        }
        (HydrationMode::Object, ResultShape::Projection(projection)) => record(projection),
        (HydrationMode::SimpleObject, ResultShape::Projection(_)) => OutputType::Unknown,
        (
            HydrationMode::Object | HydrationMode::SimpleObject,
            ResultShape::Template(template),
        ) => OutputType::Template(template.param.clone()),

        (HydrationMode::Array, ResultShape::Projection(projection)) => record(projection),
        (HydrationMode::Array, ResultShape::Entity(_) | ResultShape::Template(_)) => {
            OutputType::Unknown
        }

        (HydrationMode::Scalar, ResultShape::Projection(projection)) => record(projection),
        (HydrationMode::Scalar, ResultShape::Entity(_) | ResultShape::Template(_)) => {
            OutputType::AnyRecord
        }

        (
            HydrationMode::SingleScalar | HydrationMode::ScalarColumn,
            ResultShape::Projection(projection),
        ) => projection
            .single_field()
            .map_or(OutputType::Unknown, |field| OutputType::Scalar(field.ty)),
        (
            HydrationMode::SingleScalar | HydrationMode::ScalarColumn,
            ResultShape::Entity(_) | ResultShape::Template(_),
        ) => OutputType::Unknown,
    }
}

/// Second pass: wrap the element according to the operation's cardinality.
fn apply_wrapper(
    element: OutputType,
    mode: ModeKnowledge,
    wrapper: CardinalityWrapper,
) -> OutputType {
    match wrapper {
        // Single-scalar hydration produces one value, not a row list; the
        // materializing operations return the element unwrapped.
        CardinalityWrapper::Many => {
            if mode == ModeKnowledge::Literal(HydrationMode::SingleScalar) {
                element
            } else {
                OutputType::list(element)
            }
        }
        CardinalityWrapper::LazySequence => OutputType::sequence(element),
        CardinalityWrapper::One => element,
        CardinalityWrapper::OneOrNull => OutputType::nullable(element),
    }
}

fn record(projection: &Projection) -> OutputType {
    OutputType::Record(projection.to_vec())
}

//! rowshape: static result-shape inference for hydration-mode query APIs.
//!
//! Given the facts a static analyzer knows at one query call site (the
//! operation invoked, its hydration-mode argument, and the query's declared
//! result shape), the engine computes the precise type that call will
//! produce, or signals `Defer` so the host keeps its declared signature.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod infer;
pub mod mode;
pub mod obs;
pub mod op;
pub mod output;
pub mod project;
pub mod shape;
pub mod traits;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries, or telemetry helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        infer::CallSite,
        mode::{HydrationMode, ModeArgument, ModeKnowledge},
        op::{CardinalityWrapper, QueryOp},
        output::{InferenceResult, OutputType},
        shape::{FieldType, Projection, ResultShape, ScalarType},
    };
}

//! Call-site inference: resolve the mode, fetch the shape, project.

use crate::{
    mode::{self, ModeArgument},
    obs,
    op::{CardinalityWrapper, ModeSelector, OperationTable, QueryOp},
    output::InferenceResult,
    project::project,
    shape::ResultShape,
    traits::{ModeArgumentProvider, ResultShapeProvider},
};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

///
/// CallSite
///
/// Owned bundle of the facts a host analyzer collects for one call site.
/// Ready-made implementation of both capability traits; hosts with richer
/// AST handles can implement the traits directly instead.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct CallSite {
    /// Argument facts by position; `None` slots are omitted arguments.
    pub arguments: Vec<Option<ModeArgument>>,

    /// The query's declared result shape, when the host resolved one.
    pub shape: Option<ResultShape>,
}

impl CallSite {
    /// Call site with no arguments and a resolved shape.
    #[must_use]
    pub const fn with_shape(shape: ResultShape) -> Self {
        Self {
            arguments: Vec::new(),
            shape: Some(shape),
        }
    }

    /// Call site with a single mode argument at position 0.
    #[must_use]
    pub fn with_mode_argument(shape: ResultShape, argument: ModeArgument) -> Self {
        Self {
            arguments: vec![Some(argument)],
            shape: Some(shape),
        }
    }

    /// Append an argument fact at the next position.
    #[must_use]
    pub fn argument(mut self, argument: Option<ModeArgument>) -> Self {
        self.arguments.push(argument);
        self
    }
}

impl ResultShapeProvider for CallSite {
    fn result_shape(&self) -> Option<&ResultShape> {
        self.shape.as_ref()
    }
}

impl ModeArgumentProvider for CallSite {
    fn mode_argument(&self, position: u8) -> Option<ModeArgument> {
        self.arguments
            .get(usize::from(position))
            .copied()
            .flatten()
    }
}

/// Infer the result type of one built-in operation call.
pub fn infer<S>(op: QueryOp, site: &S) -> InferenceResult
where
    S: ResultShapeProvider + ModeArgumentProvider,
{
    let spec = op.spec();

    infer_spec(op.method_name(), spec.wrapper, spec.mode, site)
}

/// Infer by operation name against a host-configured table.
///
/// Unknown names are not an error: the host keeps its declared signature.
pub fn infer_named<S>(table: &OperationTable, name: &str, site: &S) -> InferenceResult
where
    S: ResultShapeProvider + ModeArgumentProvider,
{
    match table.get(name) {
        Some(spec) => infer_spec(name, spec.wrapper, spec.mode, site),
        None => {
            obs::record_deferred(name);
            InferenceResult::Defer
        }
    }
}

fn infer_spec<S>(
    name: &str,
    wrapper: CardinalityWrapper,
    selector: ModeSelector,
    site: &S,
) -> InferenceResult
where
    S: ResultShapeProvider + ModeArgumentProvider,
{
    let argument = match selector {
        ModeSelector::Implicit(_) => None,
        ModeSelector::Argument { position, .. } => site.mode_argument(position),
    };
    let mode = mode::resolve(argument, &selector);

    let Some(shape) = site.result_shape() else {
        obs::record_deferred(name);
        return InferenceResult::Defer;
    };

    let result = project(mode, shape, wrapper);
    obs::record_outcome(name, &result);

    result
}

//! Hydration modes and call-site mode resolution.
//!
//! Mode resolution is total: missing or non-constant information always
//! degrades to [`ModeKnowledge::Unknown`], never to an error.

use crate::op::{ModeSelector, OperationDefault};
use derive_more::{Display, FromStr};
use serde::{Deserialize, Serialize};


///
/// HydrationMode
///
/// How the engine converts one raw result row into a returned value.
/// Closed set; every mode the runtime accepts is listed here.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum HydrationMode {
    /// Row re-encoded as an associative record.
    Array,
    /// Row hydrated into a full entity object.
    Object,
    /// Row flattened into prefixed scalar columns.
    Scalar,
    /// Single column of each row, collected positionally.
    ScalarColumn,
    /// Partial entity without association traversal.
    SimpleObject,
    /// Exactly one scalar value from a one-row, one-column result.
    SingleScalar,
}

impl HydrationMode {
    /// Every mode, for exhaustive table checks.
    pub const ALL: [Self; 6] = [
        Self::Array,
        Self::Object,
        Self::Scalar,
        Self::ScalarColumn,
        Self::SimpleObject,
        Self::SingleScalar,
    ];
}

///
/// ModeArgument
///
/// What the host analyzer knows about the mode argument expression at a
/// call site. Omission is modeled as `None` at the provider boundary.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ModeArgument {
    /// Compile-time constant enumeration literal.
    Constant(HydrationMode),

    /// Present, but not a known constant (e.g. a parameter of the mode's
    /// nominal type with no narrowed literal value).
    Dynamic,
}

///
/// ModeKnowledge
///
/// Resolved mode knowledge for one call site. Produced once by
/// [`resolve`], consumed once by the projector.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ModeKnowledge {
    /// The mode is statically known.
    Literal(HydrationMode),

    /// Argument omitted; the operation's fixed default applies.
    /// Projects identically to `Literal(Object)`: every fixed default in
    /// the operation table is object-hydrating.
    Default,

    /// The mode cannot be determined statically.
    Unknown,
}

impl ModeKnowledge {
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

/// Resolve the hydration mode for one call site.
///
/// Implicit-mode operations ignore arguments entirely. For operations that
/// take a mode argument, a constant literal wins, a dynamic expression
/// degrades to `Unknown`, and omission falls back to the operation default:
/// fixed defaults are statically known, inherited defaults read a runtime
/// property of the query value and are not.
#[must_use]
pub const fn resolve(argument: Option<ModeArgument>, selector: &ModeSelector) -> ModeKnowledge {
    match selector {
        ModeSelector::Implicit(mode) => ModeKnowledge::Literal(*mode),
        ModeSelector::Argument { default, .. } => match argument {
            Some(ModeArgument::Constant(mode)) => ModeKnowledge::Literal(mode),
            Some(ModeArgument::Dynamic) => ModeKnowledge::Unknown,
            None => match default {
                OperationDefault::Fixed(mode) => ModeKnowledge::Literal(*mode),
                OperationDefault::Inherited => ModeKnowledge::Unknown,
            },
        },
    }
}

//! The result-returning operation surface: cardinality wrappers, mode
//! selection, and the name-keyed operation table.

use crate::mode::HydrationMode;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};
use thiserror::Error as ThisError;

#[cfg(test)]
mod tests;

///
/// CardinalityWrapper
/// Container shape an operation imposes around the element type.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CardinalityWrapper {
    /// Ordered, finite sequence of elements.
    Many,

    /// Possibly-infinite single-pass sequence, keyed by position.
    LazySequence,

    /// Exactly one element; none/many is a runtime error, not modeled here.
    One,

    /// Zero or one element.
    OneOrNull,
}

///
/// OperationDefault
/// What an omitted mode argument falls back to.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OperationDefault {
    /// The operation signature pins the default mode.
    Fixed(HydrationMode),

    /// The default reads a mutable property of the query value at runtime
    /// and is statically unknowable.
    Inherited,
}

///
/// ModeSelector
/// How one operation determines its hydration mode.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ModeSelector {
    /// Convenience operation with a fixed mode and no mode argument.
    Implicit(HydrationMode),

    /// The mode is taken from the argument at `position`, falling back to
    /// `default` when omitted.
    Argument {
        position: u8,
        default: OperationDefault,
    },
}

///
/// QueryOp
/// The built-in result-returning operations of the query API.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum QueryOp {
    /// Single-column rows collected positionally (implicit ScalarColumn).
    ColumnResults,

    /// Materialize all rows, mode inherited from the query value.
    Execute,

    /// Materialize all rows through the statement cache.
    ExecuteCached,

    /// Materialize all rows, bypassing the statement cache.
    ExecuteUncached,

    /// Stream rows lazily; defaults to object hydration.
    Iterate,

    /// Rows as associative records (implicit Array).
    RecordResults,

    /// Materialize all rows; defaults to object hydration.
    Results,

    /// Rows flattened to scalar columns (implicit Scalar).
    ScalarResults,

    /// Require at most one row, mode inherited.
    SingleOrNull,

    /// Require exactly one row, mode inherited.
    SingleResult,

    /// One scalar from a one-row, one-column result (implicit SingleScalar).
    SingleScalar,
}

impl QueryOp {
    /// Every built-in operation, for table construction and tests.
    pub const ALL: [Self; 11] = [
        Self::ColumnResults,
        Self::Execute,
        Self::ExecuteCached,
        Self::ExecuteUncached,
        Self::Iterate,
        Self::RecordResults,
        Self::Results,
        Self::ScalarResults,
        Self::SingleOrNull,
        Self::SingleResult,
        Self::SingleScalar,
    ];

    /// Stable snake_case method name used for host lookup.
    #[must_use]
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::ColumnResults => "column_results",
            Self::Execute => "execute",
            Self::ExecuteCached => "execute_cached",
            Self::ExecuteUncached => "execute_uncached",
            Self::Iterate => "iterate",
            Self::RecordResults => "record_results",
            Self::Results => "results",
            Self::ScalarResults => "scalar_results",
            Self::SingleOrNull => "single_or_null",
            Self::SingleResult => "single_result",
            Self::SingleScalar => "single_scalar",
        }
    }

    /// Fixed inference spec for this operation.
    #[must_use]
    pub const fn spec(self) -> OperationSpec {
        const INHERITED_0: ModeSelector = ModeSelector::Argument {
            position: 0,
            default: OperationDefault::Inherited,
        };
        const INHERITED_1: ModeSelector = ModeSelector::Argument {
            position: 1,
            default: OperationDefault::Inherited,
        };

        let (wrapper, mode) = match self {
            Self::Results => (
                CardinalityWrapper::Many,
                ModeSelector::Argument {
                    position: 0,
                    default: OperationDefault::Fixed(HydrationMode::Object),
                },
            ),
            Self::Execute | Self::ExecuteCached | Self::ExecuteUncached => {
                (CardinalityWrapper::Many, INHERITED_1)
            }
            Self::Iterate => (
                CardinalityWrapper::LazySequence,
                ModeSelector::Argument {
                    position: 1,
                    default: OperationDefault::Fixed(HydrationMode::Object),
                },
            ),
            Self::SingleResult => (CardinalityWrapper::One, INHERITED_0),
            Self::SingleOrNull => (CardinalityWrapper::OneOrNull, INHERITED_0),
            Self::RecordResults => (
                CardinalityWrapper::Many,
                ModeSelector::Implicit(HydrationMode::Array),
            ),
            Self::ScalarResults => (
                CardinalityWrapper::Many,
                ModeSelector::Implicit(HydrationMode::Scalar),
            ),
            Self::SingleScalar => (
                CardinalityWrapper::One,
                ModeSelector::Implicit(HydrationMode::SingleScalar),
            ),
            Self::ColumnResults => (
                CardinalityWrapper::Many,
                ModeSelector::Implicit(HydrationMode::ScalarColumn),
            ),
        };

        OperationSpec { wrapper, mode }
    }
}

impl fmt::Display for QueryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method_name())
    }
}

impl FromStr for QueryOp {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.method_name() == s)
            .ok_or_else(|| ParseOpError::UnknownOperation {
                name: s.to_string(),
            })
    }
}

///
/// ParseOpError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ParseOpError {
    #[error("unknown query operation '{name}'")]
    UnknownOperation { name: String },
}

///
/// OperationSpec
/// Cardinality wrapper plus mode selection for one operation.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct OperationSpec {
    pub wrapper: CardinalityWrapper,
    pub mode: ModeSelector,
}

///
/// OperationTable
///
/// Name-keyed operation registry: the built-in surface above, plus any
/// host-registered convenience operations. Lookup of an unknown name is
/// not an error; the host simply defers.
///

#[derive(Clone, Debug, Default)]
pub struct OperationTable {
    entries: BTreeMap<String, OperationSpec>,
}

impl OperationTable {
    /// Empty table with no operations registered.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Table pre-populated with every built-in operation.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for op in QueryOp::ALL {
            table
                .entries
                .insert(op.method_name().to_string(), op.spec());
        }

        table
    }

    /// Register (or replace) an operation under `name`.
    #[must_use]
    pub fn with_operation(mut self, name: impl Into<String>, spec: OperationSpec) -> Self {
        self.entries.insert(name.into(), spec);
        self
    }

    /// Look up the spec registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OperationSpec> {
        self.entries.get(name)
    }

    /// Number of registered operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

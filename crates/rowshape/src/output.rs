//! Inferred output types: what the host reports for one call site.

use crate::shape::{EntityRef, FieldType, ProjectionField, TemplateRef};
use serde::{Deserialize, Serialize};
use std::fmt;


///
/// OutputType
///
/// Structural description of an inferred return type. Element variants come
/// first; `List`, `Sequence`, and `Nullable` wrap an element according to
/// the operation's cardinality.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OutputType {
    /// A named entity object type.
    Entity(EntityRef),

    /// Typed record with ordered named fields.
    Record(Vec<ProjectionField>),

    /// A single scalar value.
    Scalar(FieldType),

    /// A row whose keys and value types cannot be expressed statically.
    AnyRecord,

    /// A generic parameter passed through unchanged.
    Template(TemplateRef),

    /// Opaque value: the call could not be narrowed further.
    Unknown,

    /// Ordered, finite sequence.
    List(Box<OutputType>),

    /// Lazy sequence keyed by ascending position starting at 0.
    Sequence(Box<OutputType>),

    /// Value-or-absent.
    Nullable(Box<OutputType>),
}

impl OutputType {
    /// Wrap an element in an ordered finite sequence.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::List(Box::new(element))
    }

    /// Wrap an element in a lazy position-keyed sequence.
    #[must_use]
    pub fn sequence(element: Self) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Union an element with the absent marker.
    ///
    /// `Unknown` already admits absence and stays `Unknown`; wrapping an
    /// already-nullable type is a no-op.
    #[must_use]
    pub fn nullable(element: Self) -> Self {
        match element {
            Self::Unknown => Self::Unknown,
            nullable @ Self::Nullable(_) => nullable,
            other => Self::Nullable(Box::new(other)),
        }
    }

    /// True when nothing about the value is statically known.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(entity) => write!(f, "{entity}"),
            Self::Record(fields) => {
                write!(f, "record{{")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, display_field_type(field.ty))?;
                }
                write!(f, "}}")
            }
            Self::Scalar(ty) => write!(f, "{}", display_field_type(*ty)),
            Self::AnyRecord => write!(f, "record"),
            Self::Template(param) => write!(f, "{param}"),
            Self::Unknown => write!(f, "unknown"),
            Self::List(element) => write!(f, "list<{element}>"),
            Self::Sequence(element) => write!(f, "sequence<nat, {element}>"),
            Self::Nullable(element) => write!(f, "{element}?"),
        }
    }
}

/// Render a field type as a lowercase label, `?`-suffixed when nullable.
fn display_field_type(ty: FieldType) -> String {
    let label = ty.scalar.to_string().to_lowercase();

    if ty.nullable {
        format!("{label}?")
    } else {
        label
    }
}

///
/// InferenceResult
///
/// Either a concrete inferred type or the sentinel instructing the host to
/// keep the operation's declared, less-precise signature.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum InferenceResult {
    /// The call site narrowed to a concrete type description.
    Narrowed(OutputType),

    /// Insufficient information; the host falls back to its declared type.
    Defer,
}

impl InferenceResult {
    #[must_use]
    pub const fn is_defer(&self) -> bool {
        matches!(self, Self::Defer)
    }

    /// The narrowed type, if any.
    #[must_use]
    pub const fn narrowed(&self) -> Option<&OutputType> {
        match self {
            Self::Narrowed(ty) => Some(ty),
            Self::Defer => None,
        }
    }
}

impl From<OutputType> for InferenceResult {
    fn from(ty: OutputType) -> Self {
        Self::Narrowed(ty)
    }
}

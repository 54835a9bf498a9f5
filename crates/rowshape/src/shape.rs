//! Declared result shapes: what one query yields per row before any
//! hydration-mode transformation is applied.

use derive_more::{Deref, Display, FromStr, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;


///
/// ShapeError
/// Invariant violations for [`Projection`] construction.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ShapeError {
    #[error("projection must include at least one field")]
    EmptyProjection,

    #[error("projection field '{name}' is declared more than once")]
    DuplicateProjectionField { name: String },
}

///
/// ScalarType
///
/// Scalar/temporal vocabulary for projected fields. Pruned to the kinds a
/// select list can surface; runtime representations live with the host.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ScalarType {
    Blob,
    Bool,
    Date,
    Decimal,
    Float,
    Int,
    Text,
    Timestamp,
    Uint,
    Ulid,
}

///
/// FieldType
/// Scalar kind plus nullability for one projected field.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FieldType {
    pub scalar: ScalarType,
    pub nullable: bool,
}

impl FieldType {
    #[must_use]
    pub const fn new(scalar: ScalarType) -> Self {
        Self {
            scalar,
            nullable: false,
        }
    }

    #[must_use]
    pub const fn nullable(scalar: ScalarType) -> Self {
        Self {
            scalar,
            nullable: true,
        }
    }
}

///
/// ProjectionField
/// One named field of a projection, in select order.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ProjectionField {
    pub name: String,
    pub ty: FieldType,
}

impl ProjectionField {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// Projection
///
/// Ordered, validated field list for a non-entity select list.
/// Field names are unique within one projection and order is semantically
/// significant: it drives record field ordering in inferred types.
///
/// Mutation is not exposed; a projection is immutable once constructed.
///

#[derive(Clone, Debug, Deref, Deserialize, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(try_from = "Vec<ProjectionField>", into = "Vec<ProjectionField>")]
pub struct Projection(Vec<ProjectionField>);

impl Projection {
    /// Build a projection, rejecting empty or duplicate field lists.
    pub fn new(fields: Vec<ProjectionField>) -> Result<Self, ShapeError> {
        if fields.is_empty() {
            return Err(ShapeError::EmptyProjection);
        }

        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ShapeError::DuplicateProjectionField {
                    name: field.name.clone(),
                });
            }
        }

        Ok(Self(fields))
    }

    /// The sole field, when the projection has exactly one.
    #[must_use]
    pub fn single_field(&self) -> Option<&ProjectionField> {
        match self.0.as_slice() {
            [field] => Some(field),
            _ => None,
        }
    }

    /// Consume the projection and return its fields in select order.
    #[must_use]
    pub fn into_fields(self) -> Vec<ProjectionField> {
        self.0
    }
}

impl TryFrom<Vec<ProjectionField>> for Projection {
    type Error = ShapeError;

    fn try_from(fields: Vec<ProjectionField>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<Projection> for Vec<ProjectionField> {
    fn from(projection: Projection) -> Self {
        projection.0
    }
}

///
/// EntityRef
/// Path-like name of an entity type, as the host's metadata resolver
/// reports it.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub struct EntityRef(String);

impl EntityRef {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

///
/// TemplateRef
/// Name of a generic parameter bound to the query value at the call site.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub struct TemplateRef(String);

impl TemplateRef {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

///
/// TemplateBound
/// Upper-bound knowledge for an unresolved generic result parameter.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TemplateBound {
    /// Unconstrained: the bound admits a void-like result, so no concrete
    /// shape may be assumed.
    MaybeVoid,

    /// The upper bound excludes the void-like possibility (e.g. constrained
    /// to array|object).
    NonVoid,
}

///
/// TemplateShape
/// An unresolved generic placeholder standing in for the element shape.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TemplateShape {
    pub param: TemplateRef,
    pub bound: TemplateBound,
}

impl TemplateShape {
    #[must_use]
    pub fn new(param: impl Into<String>, bound: TemplateBound) -> Self {
        Self {
            param: TemplateRef::new(param),
            bound,
        }
    }
}

///
/// ResultShape
///
/// Declared element-level structure of one query's output. Exactly one
/// variant is active; `Entity` and `Projection` are terminal.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResultShape {
    /// A single named object type.
    Entity(EntityRef),

    /// A field list in select order.
    Projection(Projection),

    /// An unresolved generic parameter, optionally constrained.
    Template(TemplateShape),
}

impl ResultShape {
    /// Shorthand for an entity shape.
    #[must_use]
    pub fn entity(path: impl Into<String>) -> Self {
        Self::Entity(EntityRef::new(path))
    }

    /// Shorthand for a projection shape.
    pub fn projection(fields: Vec<ProjectionField>) -> Result<Self, ShapeError> {
        Ok(Self::Projection(Projection::new(fields)?))
    }

    /// Shorthand for a template placeholder shape.
    #[must_use]
    pub fn template(param: impl Into<String>, bound: TemplateBound) -> Self {
        Self::Template(TemplateShape::new(param, bound))
    }
}

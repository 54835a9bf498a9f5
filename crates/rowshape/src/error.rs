use crate::{op::ParseOpError, shape::ShapeError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level error wrapper. Inference itself cannot fail; errors arise
/// only at construction and name-parsing boundaries.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("{0}")]
    Shape(#[from] ShapeError),

    #[error("{0}")]
    ParseOp(#[from] ParseOpError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{op::QueryOp, shape::Projection};

    fn build_shape() -> Result<Projection, Error> {
        Ok(Projection::new(vec![])?)
    }

    fn parse_op(name: &str) -> Result<QueryOp, Error> {
        Ok(name.parse::<QueryOp>()?)
    }

    #[test]
    fn boundary_errors_propagate_through_the_wrapper() {
        let err = build_shape().expect_err("empty projection should fail");
        assert_eq!(err, Error::Shape(ShapeError::EmptyProjection));
        assert_eq!(err.to_string(), "projection must include at least one field");

        let err = parse_op("fetch_everything").expect_err("unknown op should fail");
        assert_eq!(
            err.to_string(),
            "unknown query operation 'fetch_everything'"
        );
    }
}

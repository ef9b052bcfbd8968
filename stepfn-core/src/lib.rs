#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod tolerance;

mod linear;
pub use linear::{LinearFunction, LinearFunctionError};

pub mod piecewise;
pub use piecewise::{
    Combinator, DOMAIN_MAX, DOMAIN_MIN, MergeRule, Piece, PiecewiseError, PiecewiseFunction,
    Relation, RelationError,
};

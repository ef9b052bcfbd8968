//! Piecewise-constant functions of one real variable.
//!
//! A [`PiecewiseFunction`] is an ordered list of [`Piece`]s, each holding a
//! constant value up to (and possibly including) its upper bound. Functions
//! are defined on `[DOMAIN_MIN, DOMAIN_MAX]`; whatever the explicit pieces do
//! not cover is an implicit zero tail running up to `DOMAIN_MAX` inclusive.
//!
//! Binary operators walk both functions in lock step and combine the values
//! with a [`MergeRule`]; [`Combinator`] names the built-in rules. Comparing a
//! function with a [`LinearFunction`](crate::LinearFunction) produces a 0/1
//! indicator function, as do the logical operators.

mod combinator;
mod inequality;
mod merge;
mod ops;
mod piece;
mod range;
mod sum;

pub use combinator::{Combinator, MergeRule};
pub use inequality::{Relation, RelationError};
pub use piece::Piece;

use crate::tolerance::ApproxEq as _;
use std::ops::Index;
use tracing::{Level, event};

/// The lowest point of every function's domain
pub const DOMAIN_MIN: f64 = f64::MIN;

/// The sentinel top of every function's domain. This is the largest finite
/// `f64`, never infinity.
pub const DOMAIN_MAX: f64 = f64::MAX;

/// A step function built from constant-valued pieces
///
/// Pieces are appended in order of non-decreasing upper bound through
/// [`PiecewiseFunction::add`], which enforces:
/// 1. Upper bounds and values are finite.
/// 2. Upper bounds never decrease (approximately equal bounds count as equal).
/// 3. No two consecutive pieces both claim the same bound.
/// 4. A piece ending where the previous one stopped short includes that bound.
///
/// An empty function is the constant zero function.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PiecewiseFunctionDto", into = "PiecewiseFunctionDto")
)]
pub struct PiecewiseFunction {
    pieces: Vec<Piece>,
}

impl PiecewiseFunction {
    /// Creates the empty (constant zero) function
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a function from an ordered sequence of pieces, validating each in turn
    pub fn from_pieces(pieces: impl IntoIterator<Item = Piece>) -> Result<Self, PiecewiseError> {
        let pieces = pieces.into_iter();
        let mut function = Self {
            pieces: Vec::with_capacity(pieces.size_hint().0),
        };
        for piece in pieces {
            function.add(piece.upper_bound, piece.include_upper_bound, piece.value)?;
        }
        Ok(function)
    }

    /// Appends a piece ending at `upper_bound`.
    ///
    /// The lower bound is implied by the previous piece. On error the function
    /// is left unchanged.
    pub fn add(
        &mut self,
        upper_bound: f64,
        include_upper_bound: bool,
        value: f64,
    ) -> Result<(), PiecewiseError> {
        if !upper_bound.is_finite() {
            return Err(PiecewiseError::InvalidUpperBound(upper_bound));
        }
        if !value.is_finite() {
            return Err(PiecewiseError::InvalidValue(value));
        }

        if let Some(last) = self.pieces.last() {
            if upper_bound.approx_eq(last.upper_bound) {
                if last.include_upper_bound {
                    return Err(PiecewiseError::DoubleInclusive(last.upper_bound));
                }
                if !include_upper_bound {
                    return Err(PiecewiseError::EmptyPiece(last.upper_bound));
                }
            } else if upper_bound < last.upper_bound {
                return Err(PiecewiseError::NonMonotone {
                    upper_bound,
                    previous: last.upper_bound,
                });
            }
        }

        self.pieces
            .push(Piece::new(upper_bound, include_upper_bound, value));
        Ok(())
    }

    /// Appends a piece that includes its upper bound
    pub fn add_inclusive(&mut self, upper_bound: f64, value: f64) -> Result<(), PiecewiseError> {
        self.add(upper_bound, true, value)
    }

    /// The number of explicit pieces
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Returns `true` if there are no explicit pieces (the function is zero everywhere)
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Returns a slice over the explicit pieces
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Iterates over the explicit pieces
    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    /// Returns the value of the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`PiecewiseError::NonFiniteArgument`] if `x` is NaN or infinite.
    pub fn evaluate(&self, x: f64) -> Result<f64, PiecewiseError> {
        if !x.is_finite() {
            return Err(PiecewiseError::NonFiniteArgument(x));
        }

        Ok(self
            .pieces
            .iter()
            .find(|piece| {
                x < piece.upper_bound
                    || (piece.include_upper_bound && x.approx_eq(piece.upper_bound))
            })
            .map_or(0.0, |piece| piece.value))
    }

    /// Determines whether two functions have (approximately) the same value everywhere.
    ///
    /// The piece layout does not matter: a function split into more pieces is
    /// equivalent to its consolidated form, and the empty function is
    /// equivalent to any function that is zero everywhere.
    pub fn is_equivalent(&self, other: &Self) -> bool {
        merge::Aligned::new(&self.pieces, &other.pieces).all(|segment| segment.values.agree())
    }

    /// Returns an equivalent function in which adjacent pieces with
    /// approximately equal values have been merged.
    ///
    /// Pieces are merged right to left; the surviving piece keeps the bound,
    /// inclusion flag and value of the higher piece.
    pub fn consolidate(&self) -> Self {
        let mut merged: Vec<Piece> = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces.iter().rev() {
            match merged.last() {
                Some(higher) if higher.value.approx_eq(piece.value) => {}
                _ => merged.push(*piece),
            }
        }
        merged.reverse();
        Self { pieces: merged }
    }

    /// Returns `true` if any explicit piece has a non-zero value
    pub fn is_ever_non_zero(&self) -> bool {
        self.pieces.iter().any(|piece| !piece.value.approx_zero())
    }

    /// Returns `true` if the explicit pieces cover the domain up to and
    /// including `DOMAIN_MAX`, i.e. there is no implicit zero tail.
    pub fn reaches_sentinel(&self) -> bool {
        self.pieces
            .last()
            .is_some_and(|last| last.include_upper_bound && last.upper_bound.approx_eq(DOMAIN_MAX))
    }

    /// Creates a function with the given pieces, without validation
    pub(crate) fn from_raw(pieces: Vec<Piece>) -> Self {
        Self { pieces }
    }

    /// Appends a piece produced by the engine, without validation.
    ///
    /// The value is first brought into the finite range (see [`finite`]). If
    /// the previous piece carries the exact same value it is replaced rather
    /// than followed, so results never contain runs of equal pieces.
    pub(crate) fn push_coalesced(&mut self, upper_bound: f64, include_upper_bound: bool, value: f64) {
        let value = finite(value);
        // Exact comparison; near-equal values are left for `consolidate`
        if self.pieces.last().is_some_and(|last| last.value == value) {
            self.pieces.pop();
        }
        self.pieces
            .push(Piece::new(upper_bound, include_upper_bound, value));
    }

    /// Closes the function at the sentinel with a final piece of the given
    /// value, unless it already covers `DOMAIN_MAX`.
    pub(crate) fn close_at_sentinel(&mut self, value: f64) {
        if !self.reaches_sentinel() {
            self.push_coalesced(DOMAIN_MAX, true, value);
        }
    }

    /// Returns the explicit pieces followed by the implicit zero tail as a real
    /// piece, when there is one.
    pub(crate) fn pieces_with_tail(&self) -> impl Iterator<Item = Piece> + '_ {
        let tail = (!self.reaches_sentinel()).then_some(Piece::new(DOMAIN_MAX, true, 0.0));
        self.pieces.iter().copied().chain(tail)
    }
}

/// Maps a computed value onto one that [`PiecewiseFunction::add`] accepts:
/// NaN becomes zero and the infinities saturate at `±f64::MAX`.
fn finite(value: f64) -> f64 {
    if value.is_finite() {
        return value;
    }

    event!(Level::WARN, value, "piecewise result is not finite");
    if value.is_nan() {
        0.0
    } else {
        f64::MAX.copysign(value)
    }
}

impl Index<usize> for PiecewiseFunction {
    type Output = Piece;

    fn index(&self, index: usize) -> &Piece {
        &self.pieces[index]
    }
}

impl<'a> IntoIterator for &'a PiecewiseFunction {
    type Item = &'a Piece;
    type IntoIter = std::slice::Iter<'a, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}

/// DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug)]
pub struct PiecewiseFunctionDto(pub Vec<Piece>);

impl From<PiecewiseFunction> for PiecewiseFunctionDto {
    fn from(value: PiecewiseFunction) -> Self {
        Self(value.pieces)
    }
}

impl TryFrom<PiecewiseFunctionDto> for PiecewiseFunction {
    type Error = PiecewiseError;

    fn try_from(value: PiecewiseFunctionDto) -> Result<Self, Self::Error> {
        Self::from_pieces(value.0)
    }
}

/// Errors that can occur when building or evaluating a PiecewiseFunction
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum PiecewiseError {
    /// Error when an upper bound is NaN or infinite
    #[error("invalid upper bound: {0}")]
    InvalidUpperBound(f64),
    /// Error when a piece value is NaN or infinite
    #[error("invalid piece value: {0}")]
    InvalidValue(f64),
    /// Error when a piece ends below the previous piece
    #[error("upper bound {upper_bound} is below the previous upper bound {previous}")]
    NonMonotone {
        /// The rejected upper bound
        upper_bound: f64,
        /// The upper bound of the last piece
        previous: f64,
    },
    /// Error when a piece ends at a bound already included by the previous piece
    #[error("cannot end a piece at {0}, the previous piece already includes it")]
    DoubleInclusive(f64),
    /// Error when a piece would cover no points: it excludes the bound at
    /// which the previous piece also stopped short
    #[error("cannot end a piece at {0} without including it, the previous piece already ends there")]
    EmptyPiece(f64),
    /// Error when evaluating at NaN or an infinity
    #[error("function undefined at {0}")]
    NonFiniteArgument(f64),
}

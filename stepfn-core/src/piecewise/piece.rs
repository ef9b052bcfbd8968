use crate::linear::LinearFunction;
use crate::tolerance::ApproxEq as _;

/// One constant-valued interval of a [`PiecewiseFunction`](super::PiecewiseFunction)
///
/// A piece only stores its upper end: it covers `(lower, upper_bound]` when
/// `include_upper_bound` is set and `(lower, upper_bound)` otherwise, where
/// `lower` is the upper bound of the preceding piece (or the domain minimum
/// for the first piece).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    /// The upper end of the interval
    pub upper_bound: f64,
    /// Whether `upper_bound` itself belongs to this piece (defaults to `true` when deserializing)
    #[cfg_attr(feature = "serde", serde(default = "included"))]
    pub include_upper_bound: bool,
    /// The constant value of the function on this interval
    pub value: f64,
}

#[cfg(feature = "serde")]
fn included() -> bool {
    true
}

impl Piece {
    /// Creates a piece; no validation is performed until it is added to a function
    pub const fn new(upper_bound: f64, include_upper_bound: bool, value: f64) -> Self {
        Self {
            upper_bound,
            include_upper_bound,
            value,
        }
    }

    /// Determines whether `x` lies within this piece, given where the piece starts.
    pub fn contains(&self, x: f64, lower_bound: f64, include_lower_bound: bool) -> bool {
        if x.approx_eq(lower_bound) && !include_lower_bound {
            return false;
        }

        if x.approx_eq(self.upper_bound) && !self.include_upper_bound {
            return false;
        }

        !(x < lower_bound || x > self.upper_bound)
    }

    /// Returns the x-coordinate where `line` reaches this piece's value, if that
    /// point falls within the piece.
    pub fn intersect(
        &self,
        line: &LinearFunction,
        lower_bound: f64,
        include_lower_bound: bool,
    ) -> Option<f64> {
        let x = line.inverse(self.value);
        self.contains(x, lower_bound, include_lower_bound).then_some(x)
    }
}

use crate::piecewise::{PiecewiseFunction, Relation};
use crate::tolerance::ApproxEq as _;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A straight line `y = slope * x + intercept`
///
/// Lines are plain values: every arithmetic operation returns a new line. They
/// mostly exist to be compared against a [`PiecewiseFunction`], which yields a
/// 0/1-valued step function describing where the relation holds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearFunction {
    slope: f64,
    intercept: f64,
}

impl LinearFunction {
    /// Creates a line from its slope and y-intercept
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Creates a line with the given slope passing through `(x, y)`
    pub fn through_point(slope: f64, x: f64, y: f64) -> Self {
        Self {
            slope,
            intercept: y - slope * x,
        }
    }

    /// Creates the line passing through `(x1, y1)` and `(x2, y2)`
    ///
    /// # Errors
    ///
    /// Returns [`LinearFunctionError::VerticalLine`] if the x-coordinates are
    /// approximately equal, as the slope would be undefined.
    pub fn through_points(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, LinearFunctionError> {
        if x1.approx_eq(x2) {
            return Err(LinearFunctionError::VerticalLine { x1, x2 });
        }

        let slope = (y2 - y1) / (x2 - x1);
        Ok(Self {
            slope,
            intercept: y1 - slope * x1,
        })
    }

    /// The slope of the line
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// The y-intercept of the line
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns `y` at the given `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Returns the `x` at which the line reaches `y`.
    ///
    /// The slope is not checked: a flat line yields an infinite or NaN result.
    pub fn inverse(&self, y: f64) -> f64 {
        (y - self.intercept) / self.slope
    }

    /// Returns the x-coordinate where the two lines meet, or `None` if their
    /// slopes are approximately equal (parallel or identical lines).
    pub fn intersection(&self, other: &Self) -> Option<f64> {
        if self.slope.approx_eq(other.slope) {
            return None;
        }

        // y = ax + c and y = bx + d meet at x = (d - c) / (a - b)
        Some((other.intercept - self.intercept) / (self.slope - other.slope))
    }

    /// Builds the 0/1 step function describing where `self <relation> function` holds.
    ///
    /// This is the mirror image of [`PiecewiseFunction::compare_line`]: the
    /// operands are swapped and the relation flipped.
    pub fn compare(&self, relation: Relation, function: &PiecewiseFunction) -> PiecewiseFunction {
        function.compare_line(relation.flipped(), self)
    }
}

impl Add<f64> for LinearFunction {
    type Output = Self;

    /// Raises the line by `rhs`
    fn add(self, rhs: f64) -> Self {
        Self::new(self.slope, self.intercept + rhs)
    }
}

impl Sub<f64> for LinearFunction {
    type Output = Self;

    /// Lowers the line by `rhs`
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.slope, self.intercept - rhs)
    }
}

impl Mul<f64> for LinearFunction {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.slope * rhs, self.intercept * rhs)
    }
}

impl Div<f64> for LinearFunction {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.slope / rhs, self.intercept / rhs)
    }
}

impl Add for LinearFunction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.slope + rhs.slope, self.intercept + rhs.intercept)
    }
}

impl Sub for LinearFunction {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.slope - rhs.slope, self.intercept - rhs.intercept)
    }
}

impl Neg for LinearFunction {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.slope, -self.intercept)
    }
}

/// Errors that can occur when constructing a LinearFunction
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LinearFunctionError {
    /// Error when both points share (approximately) the same x-coordinate
    #[error("x-coordinates {x1} and {x2} are identical or approximately equal")]
    VerticalLine {
        /// The x-coordinate of the first point
        x1: f64,
        /// The x-coordinate of the second point
        x2: f64,
    },
}

//! Tolerance-based comparison of `f64` values.
//!
//! Every comparison in the engine goes through these helpers: two values are
//! "approximately equal" when they are bit-identical, when both are within the
//! tolerance of zero, or when their relative difference is below the tolerance.

/// The tolerance used by the engine when none is given explicitly.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// A validated, non-negative comparison tolerance
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Tolerance(f64);

impl Tolerance {
    /// Creates a new tolerance, rejecting negative (or NaN) values
    pub fn new(epsilon: f64) -> Result<Self, ToleranceError> {
        if epsilon >= 0.0 {
            Ok(Self(epsilon))
        } else {
            Err(ToleranceError::Negative(epsilon))
        }
    }

    /// Returns the raw threshold
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` if `|a| ≤ ε`
    #[inline]
    pub fn is_zero(self, a: f64) -> bool {
        a.abs() <= self.0
    }

    /// Returns `true` if `a` and `b` are equal up to this tolerance.
    ///
    /// Near zero the comparison is absolute; elsewhere it is relative to the
    /// larger magnitude of the two.
    #[inline]
    pub fn equals(self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }

        if self.is_zero(a) {
            return self.is_zero(b);
        }

        let (greater, lesser) = if a.abs() < b.abs() { (b, a) } else { (a, b) };

        ((greater - lesser) / greater).abs() < self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = ToleranceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tolerance> for f64 {
    fn from(value: Tolerance) -> Self {
        value.0
    }
}

/// Checks whether two values are equal other than some amount attributable to rounding.
///
/// Fails if `epsilon` is negative.
pub fn approximately_equal(a: f64, b: f64, epsilon: f64) -> Result<bool, ToleranceError> {
    Ok(Tolerance::new(epsilon)?.equals(a, b))
}

/// Checks whether a value is within `epsilon` of zero.
///
/// Fails if `epsilon` is negative.
pub fn approximately_zero(a: f64, epsilon: f64) -> Result<bool, ToleranceError> {
    Ok(Tolerance::new(epsilon)?.is_zero(a))
}

/// Tolerance-aware comparisons against the [`DEFAULT_TOLERANCE`]
pub trait ApproxEq {
    /// Returns `true` if `self` and `other` are approximately equal
    fn approx_eq(self, other: Self) -> bool;

    /// Returns `true` if `self` is approximately zero
    fn approx_zero(self) -> bool;
}

impl ApproxEq for f64 {
    #[inline]
    fn approx_eq(self, other: Self) -> bool {
        Tolerance::default().equals(self, other)
    }

    #[inline]
    fn approx_zero(self) -> bool {
        Tolerance::default().is_zero(self)
    }
}

/// Errors that can occur when specifying a tolerance
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ToleranceError {
    /// Error when the tolerance is negative (or NaN)
    #[error("tolerance must be greater than or equal to zero (was {0})")]
    Negative(f64),
}

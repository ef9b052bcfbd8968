use crate::tolerance::ApproxEq as _;

/// A pointwise rule for combining the values of two functions.
///
/// Where only one function still has explicit pieces, the other is treated as
/// zero: the one-sided methods default to `both(value, 0)` and
/// `both(0, value)` respectively.
pub trait MergeRule {
    /// The combined value where both functions are defined
    fn both(&self, a: f64, b: f64) -> f64;

    /// The combined value past the end of the second function
    fn first_only(&self, a: f64) -> f64 {
        self.both(a, 0.0)
    }

    /// The combined value past the end of the first function
    fn second_only(&self, b: f64) -> f64 {
        self.both(0.0, b)
    }
}

/// The built-in merge rules.
///
/// Logical and relational rules produce `1.0` for true and `0.0` for false,
/// treating any value approximately equal to zero as false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Combinator {
    /// `a + b`
    Sum,
    /// `a - b`
    Difference,
    /// `a * b`
    Product,
    /// `a / b`, with the indeterminate `0 / 0` taken as zero
    Quotient,
    /// The larger of the two values
    Max,
    /// The smaller of the two values
    Min,
    /// Both values are non-zero
    And,
    /// At least one value is non-zero
    Or,
    /// Exactly one value is non-zero
    Xor,
    /// `a > b`
    Greater,
    /// `a >= b`
    GreaterOrEqual,
    /// `a < b`
    Less,
    /// `a <= b`
    LessOrEqual,
    /// `a == b`
    Equal,
    /// `a != b`
    NotEqual,
}

fn indicator(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

impl MergeRule for Combinator {
    fn both(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Sum => a + b,
            Self::Difference => a - b,
            Self::Product => a * b,
            Self::Quotient => {
                let quotient = a / b;
                if quotient.is_nan() { 0.0 } else { quotient }
            }
            Self::Max => a.max(b),
            Self::Min => a.min(b),
            Self::And => indicator(!a.approx_zero() && !b.approx_zero()),
            Self::Or => indicator(!a.approx_zero() || !b.approx_zero()),
            Self::Xor => indicator(a.approx_zero() != b.approx_zero()),
            // Equality by tolerance settles every comparison before the ordering does
            Self::Greater => indicator(!a.approx_eq(b) && a > b),
            Self::GreaterOrEqual => indicator(a.approx_eq(b) || a > b),
            Self::Less => indicator(!a.approx_eq(b) && a < b),
            Self::LessOrEqual => indicator(a.approx_eq(b) || a < b),
            Self::Equal => indicator(a.approx_eq(b)),
            Self::NotEqual => indicator(!a.approx_eq(b)),
        }
    }

    fn first_only(&self, a: f64) -> f64 {
        match self {
            // Nothing divided by zero
            Self::Quotient => 0.0,
            _ => self.both(a, 0.0),
        }
    }
}

impl<F: Fn(f64, f64) -> f64> MergeRule for F {
    fn both(&self, a: f64, b: f64) -> f64 {
        self(a, b)
    }
}

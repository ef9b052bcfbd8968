use super::{Combinator, MergeRule, PiecewiseFunction, merge};
use crate::tolerance::ApproxEq as _;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Sub};

impl PiecewiseFunction {
    /// Combines two functions pointwise with any [`MergeRule`].
    ///
    /// The result always reaches `DOMAIN_MAX`: beyond both inputs it takes
    /// the value `rule.both(0, 0)`.
    pub fn combine<R: MergeRule + ?Sized>(&self, other: &Self, rule: &R) -> Self {
        merge::combine(self, other, rule)
    }

    /// Applies `transform` to every value, including the implicit zero tail.
    pub fn map_values(&self, transform: impl Fn(f64) -> f64) -> Self {
        let mut result = Self::from_raw(Vec::with_capacity(self.len() + 1));
        for piece in self.pieces_with_tail() {
            result.push_coalesced(
                piece.upper_bound,
                piece.include_upper_bound,
                transform(piece.value),
            );
        }
        result
    }

    /// The pointwise maximum of two functions
    pub fn pointwise_max(&self, other: &Self) -> Self {
        self.combine(other, &Combinator::Max)
    }

    /// The pointwise minimum of two functions
    pub fn pointwise_min(&self, other: &Self) -> Self {
        self.combine(other, &Combinator::Min)
    }

    /// Returns `true` if there is an interval on which both functions are non-zero
    pub fn has_overlap(&self, other: &Self) -> bool {
        merge::has_overlap(self, other)
    }
}

// Implements a binary operator for every owned/borrowed combination of operands
macro_rules! combine_op {
    ($trait:ident, $method:ident, $combinator:expr) => {
        impl $trait<&PiecewiseFunction> for &PiecewiseFunction {
            type Output = PiecewiseFunction;

            fn $method(self, rhs: &PiecewiseFunction) -> PiecewiseFunction {
                merge::combine(self, rhs, &$combinator)
            }
        }

        impl $trait<PiecewiseFunction> for &PiecewiseFunction {
            type Output = PiecewiseFunction;

            fn $method(self, rhs: PiecewiseFunction) -> PiecewiseFunction {
                $trait::$method(self, &rhs)
            }
        }

        impl $trait<&PiecewiseFunction> for PiecewiseFunction {
            type Output = PiecewiseFunction;

            fn $method(self, rhs: &PiecewiseFunction) -> PiecewiseFunction {
                $trait::$method(&self, rhs)
            }
        }

        impl $trait<PiecewiseFunction> for PiecewiseFunction {
            type Output = PiecewiseFunction;

            fn $method(self, rhs: PiecewiseFunction) -> PiecewiseFunction {
                $trait::$method(&self, &rhs)
            }
        }
    };
}

combine_op!(Add, add, Combinator::Sum);
combine_op!(Sub, sub, Combinator::Difference);
combine_op!(Mul, mul, Combinator::Product);
combine_op!(Div, div, Combinator::Quotient);
combine_op!(BitAnd, bitand, Combinator::And);
combine_op!(BitOr, bitor, Combinator::Or);
combine_op!(BitXor, bitxor, Combinator::Xor);

macro_rules! scalar_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for &PiecewiseFunction {
            type Output = PiecewiseFunction;

            fn $method(self, rhs: f64) -> PiecewiseFunction {
                self.map_values(|value| value $op rhs)
            }
        }

        impl $trait<f64> for PiecewiseFunction {
            type Output = PiecewiseFunction;

            fn $method(self, rhs: f64) -> PiecewiseFunction {
                $trait::$method(&self, rhs)
            }
        }
    };
}

scalar_op!(Add, add, +);
scalar_op!(Sub, sub, -);
scalar_op!(Mul, mul, *);
scalar_op!(Div, div, /);

impl Not for &PiecewiseFunction {
    type Output = PiecewiseFunction;

    /// Logical negation: 1 wherever the function is (approximately) zero, else 0
    fn not(self) -> PiecewiseFunction {
        self.map_values(|value| if value.approx_zero() { 1.0 } else { 0.0 })
    }
}

impl Not for PiecewiseFunction {
    type Output = PiecewiseFunction;

    fn not(self) -> PiecewiseFunction {
        !&self
    }
}

impl Neg for &PiecewiseFunction {
    type Output = PiecewiseFunction;

    fn neg(self) -> PiecewiseFunction {
        self.map_values(|value| -value)
    }
}

impl Neg for PiecewiseFunction {
    type Output = PiecewiseFunction;

    fn neg(self) -> PiecewiseFunction {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piecewise::{DOMAIN_MAX, Piece};

    fn window() -> PiecewiseFunction {
        PiecewiseFunction::from_pieces([
            Piece::new(0.0, false, 0.0),
            Piece::new(10.0, true, 4.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_scalar_ops_cover_tail() {
        let f = &window() + 1.0;
        assert_eq!(
            f.pieces(),
            &[
                Piece::new(0.0, false, 1.0),
                Piece::new(10.0, true, 5.0),
                Piece::new(DOMAIN_MAX, true, 1.0),
            ]
        );
        assert_eq!(f.evaluate(1e100), Ok(1.0));

        let g = window() * 2.0;
        assert_eq!(g.evaluate(5.0), Ok(8.0));
        assert_eq!(g.evaluate(50.0), Ok(0.0));

        let h = window() / 4.0 - 1.0;
        assert_eq!(h.evaluate(5.0), Ok(0.0));
        assert_eq!(h.evaluate(-5.0), Ok(-1.0));
    }

    #[test]
    fn test_scalar_ops_on_empty() {
        let empty = PiecewiseFunction::new();
        let f = &empty + 3.0;
        assert_eq!(f.pieces(), &[Piece::new(DOMAIN_MAX, true, 3.0)]);
        assert!((&empty * 0.0).is_equivalent(&empty));
        assert!((&empty + 0.0).is_equivalent(&empty));
    }

    #[test]
    fn test_scalar_division_by_zero() {
        // 0 / 0 settles to zero, 4 / 0 saturates
        let f = &window() / 0.0;
        assert_eq!(
            f.pieces(),
            &[
                Piece::new(0.0, false, 0.0),
                Piece::new(10.0, true, f64::MAX),
                Piece::new(DOMAIN_MAX, true, 0.0),
            ]
        );
        assert_eq!(f.evaluate(50.0), Ok(0.0));
        assert!(f.is_equivalent(&f));
        assert!(PiecewiseFunction::from_pieces(f.pieces().iter().copied()).is_ok());

        let g = -window() / 0.0;
        assert_eq!(g.evaluate(5.0), Ok(-f64::MAX));
    }

    #[test]
    fn test_not() {
        let f = !&window();
        assert_eq!(
            f.pieces(),
            &[
                Piece::new(0.0, false, 1.0),
                Piece::new(10.0, true, 0.0),
                Piece::new(DOMAIN_MAX, true, 1.0),
            ]
        );
        assert_eq!((!PiecewiseFunction::new()).pieces(), &[Piece::new(DOMAIN_MAX, true, 1.0)]);
    }

    #[test]
    fn test_neg() {
        let f = -window();
        assert_eq!(f.evaluate(5.0), Ok(-4.0));
        assert_eq!(f.evaluate(-5.0), Ok(0.0));
    }

    #[test]
    fn test_operand_forms_agree() {
        let a = window();
        let b = PiecewiseFunction::from_pieces([Piece::new(5.0, true, 1.0)]).unwrap();
        let expected = (&a - &b).pieces().to_vec();
        assert_eq!((a.clone() - &b).pieces(), expected.as_slice());
        assert_eq!((&a - b.clone()).pieces(), expected.as_slice());
        assert_eq!((a.clone() - b.clone()).pieces(), expected.as_slice());
    }

    #[test]
    fn test_binary_ops() {
        let a = window();
        let b = PiecewiseFunction::from_pieces([Piece::new(5.0, true, 2.0)]).unwrap();

        let product = &a * &b;
        assert_eq!(product.evaluate(-1.0), Ok(0.0));
        assert_eq!(product.evaluate(3.0), Ok(8.0));
        assert_eq!(product.evaluate(7.0), Ok(0.0));

        let quotient = &a / &b;
        assert_eq!(quotient.evaluate(-1.0), Ok(0.0));
        assert_eq!(quotient.evaluate(3.0), Ok(2.0));
        // Past the divisor's pieces the quotient is zero, not infinite
        assert_eq!(quotient.evaluate(7.0), Ok(0.0));
        assert_eq!(quotient.evaluate(20.0), Ok(0.0));

        let zero_divisor = PiecewiseFunction::from_pieces([Piece::new(20.0, true, 0.0)]).unwrap();
        assert_eq!((&a / &zero_divisor).evaluate(3.0), Ok(f64::MAX));
        assert_eq!((&a / &zero_divisor).evaluate(-3.0), Ok(0.0));

        let xor = &a ^ &b;
        assert_eq!(xor.evaluate(-1.0), Ok(1.0));
        assert_eq!(xor.evaluate(3.0), Ok(0.0));
        assert_eq!(xor.evaluate(7.0), Ok(1.0));
        assert_eq!(xor.evaluate(20.0), Ok(0.0));

        let or = &a | &b;
        assert_eq!(or.evaluate(20.0), Ok(0.0));
        assert_eq!(or.evaluate(7.0), Ok(1.0));

        let and = &a & &b;
        assert_eq!(and.evaluate(-1.0), Ok(0.0));
        assert_eq!(and.evaluate(3.0), Ok(1.0));
    }

    #[test]
    fn test_pointwise_extremes() {
        let a = window();
        let b = PiecewiseFunction::from_pieces([
            Piece::new(5.0, true, 6.0),
            Piece::new(DOMAIN_MAX, true, -1.0),
        ])
        .unwrap();
        let max = a.pointwise_max(&b);
        assert_eq!(max.evaluate(-1.0), Ok(6.0));
        assert_eq!(max.evaluate(7.0), Ok(4.0));
        assert_eq!(max.evaluate(20.0), Ok(0.0));

        let min = a.pointwise_min(&b);
        assert_eq!(min.evaluate(-1.0), Ok(0.0));
        assert_eq!(min.evaluate(7.0), Ok(-1.0));
        assert_eq!(min.evaluate(20.0), Ok(-1.0));
    }

    #[test]
    fn test_custom_rule() {
        let a = window();
        let hypot = a.combine(&a, &|x: f64, y: f64| (x * x + y * y).sqrt());
        assert!(hypot.is_equivalent(&(&a * std::f64::consts::SQRT_2)));
    }
}

use super::{DOMAIN_MAX, DOMAIN_MIN, PiecewiseFunction};
use crate::tolerance::ApproxEq as _;

impl PiecewiseFunction {
    /// The upper bound of the last piece with a non-zero value, or NaN if every
    /// piece is (approximately) zero.
    pub fn highest_non_zero_point(&self) -> f64 {
        self.pieces
            .iter()
            .rev()
            .find(|piece| !piece.value.approx_zero())
            .map_or(f64::NAN, |piece| piece.upper_bound)
    }

    /// The point where the first non-zero piece starts, or NaN if every piece
    /// is (approximately) zero.
    pub fn lowest_non_zero_point(&self) -> f64 {
        self.pieces
            .iter()
            .position(|piece| !piece.value.approx_zero())
            .map_or(f64::NAN, |i| self.lower_bound_of(i))
    }

    /// The highest point at which the function is zero.
    ///
    /// That is `DOMAIN_MAX` whenever the function has an implicit zero tail;
    /// otherwise the upper bound of the last zero piece, or NaN if there is none.
    pub fn highest_zero_point(&self) -> f64 {
        if !self.reaches_sentinel() {
            return DOMAIN_MAX;
        }

        self.pieces
            .iter()
            .rev()
            .find(|piece| piece.value.approx_zero())
            .map_or(f64::NAN, |piece| piece.upper_bound)
    }

    /// The point where the function is first zero.
    ///
    /// That is the start of the first zero piece, failing which the start of
    /// the implicit zero tail, or NaN if the function is never zero.
    pub fn lowest_zero_point(&self) -> f64 {
        if let Some(i) = self.pieces.iter().position(|piece| piece.value.approx_zero()) {
            return self.lower_bound_of(i);
        }

        match self.pieces.last() {
            None => DOMAIN_MIN,
            Some(last) if !self.reaches_sentinel() => last.upper_bound,
            Some(_) => f64::NAN,
        }
    }

    fn lower_bound_of(&self, index: usize) -> f64 {
        index
            .checked_sub(1)
            .map_or(DOMAIN_MIN, |previous| self.pieces[previous].upper_bound)
    }
}

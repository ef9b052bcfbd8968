use super::{Combinator, DOMAIN_MIN, PiecewiseFunction, merge};
use crate::linear::LinearFunction;
use crate::tolerance::ApproxEq as _;
use tracing::{Level, event};

/// A comparison between two functions, evaluated pointwise
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Relation {
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
}

impl Relation {
    /// Returns the outcomes `(less, equal, greater)` for which the relation holds
    pub const fn flags(self) -> (bool, bool, bool) {
        match self {
            Self::Less => (true, false, false),
            Self::LessOrEqual => (true, true, false),
            Self::Equal => (false, true, false),
            Self::NotEqual => (true, false, true),
            Self::GreaterOrEqual => (false, true, true),
            Self::Greater => (false, false, true),
        }
    }

    /// The relation that holds when the operands are swapped
    pub const fn flipped(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::GreaterOrEqual => Self::LessOrEqual,
            Self::Greater => Self::Less,
            Self::Equal => Self::Equal,
            Self::NotEqual => Self::NotEqual,
        }
    }
}

impl From<Relation> for Combinator {
    fn from(value: Relation) -> Self {
        match value {
            Relation::Less => Self::Less,
            Relation::LessOrEqual => Self::LessOrEqual,
            Relation::Equal => Self::Equal,
            Relation::NotEqual => Self::NotEqual,
            Relation::GreaterOrEqual => Self::GreaterOrEqual,
            Relation::Greater => Self::Greater,
        }
    }
}

/// Where a line reaches a piece's value, relative to the piece
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Crossing {
    AtLower,
    AtUpper,
    /// Before the piece starts: the whole piece lies after the crossing
    Below,
    /// After the piece ends: the whole piece lies before the crossing
    Above,
    Inside(f64),
}

impl Crossing {
    pub(crate) fn classify(x: f64, lower_bound: f64, upper_bound: f64) -> Self {
        if x.approx_eq(lower_bound) {
            Self::AtLower
        } else if x.approx_eq(upper_bound) {
            Self::AtUpper
        } else if x < lower_bound {
            Self::Below
        } else if x > upper_bound {
            Self::Above
        } else {
            Self::Inside(x)
        }
    }
}

fn indicator(condition: bool) -> f64 {
    if condition { 1.0 } else { 0.0 }
}

impl PiecewiseFunction {
    /// Builds the 0/1 step function that is 1 wherever the value of `self`
    /// stands in one of the requested relations to `line`.
    ///
    /// `less`, `equal` and `greater` select the outcomes that count as true.
    /// The result covers the whole domain, including where `self` is only
    /// implicitly zero.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::Degenerate`] if all three flags are the same,
    /// as the result would not depend on either function.
    pub fn relate(
        &self,
        line: &LinearFunction,
        less: bool,
        equal: bool,
        greater: bool,
    ) -> Result<Self, RelationError> {
        if less == equal && equal == greater {
            return Err(RelationError::Degenerate(less));
        }
        Ok(self.relate_unchecked(line, less, equal, greater))
    }

    /// Builds the 0/1 step function describing where `self <relation> line` holds
    pub fn compare_line(&self, relation: Relation, line: &LinearFunction) -> Self {
        let (less, equal, greater) = relation.flags();
        self.relate_unchecked(line, less, equal, greater)
    }

    /// Builds the 0/1 step function describing where `self <relation> other` holds
    pub fn compare(&self, relation: Relation, other: &Self) -> Self {
        merge::combine(self, other, &Combinator::from(relation))
    }

    fn relate_unchecked(&self, line: &LinearFunction, less: bool, equal: bool, greater: bool) -> Self {
        let mut result = Self::from_raw(Vec::with_capacity(2 * self.len() + 2));

        if line.slope().approx_zero() {
            let level = line.intercept();
            for piece in self.pieces_with_tail() {
                let holds = if piece.value.approx_eq(level) {
                    equal
                } else if piece.value > level {
                    greater
                } else {
                    less
                };
                result.push_coalesced(piece.upper_bound, piece.include_upper_bound, indicator(holds));
            }
            return result;
        }

        let rising = line.slope() > 0.0;
        let before = indicator((rising && greater) || (!rising && less));
        let after = indicator((rising && less) || (!rising && greater));
        let at = indicator(equal);

        let mut lower_bound = DOMAIN_MIN;
        let mut include_lower_bound = true;

        for piece in self.pieces_with_tail() {
            let upper_bound = piece.upper_bound;
            let include_upper_bound = piece.include_upper_bound;

            match Crossing::classify(line.inverse(piece.value), lower_bound, upper_bound) {
                Crossing::AtLower => {
                    let point = include_lower_bound && at != after;
                    if point {
                        result.push_coalesced(lower_bound, true, at);
                    }
                    // A piece that is nothing but its lower bound is already covered
                    if !(point && upper_bound.approx_eq(lower_bound)) {
                        result.push_coalesced(upper_bound, include_upper_bound, after);
                    }
                }
                Crossing::AtUpper => {
                    if include_upper_bound && before != at {
                        result.push_coalesced(upper_bound, false, before);
                        result.push_coalesced(upper_bound, true, at);
                    } else {
                        result.push_coalesced(upper_bound, include_upper_bound, before);
                    }
                }
                Crossing::Below => {
                    result.push_coalesced(upper_bound, include_upper_bound, after);
                }
                Crossing::Above => {
                    result.push_coalesced(upper_bound, include_upper_bound, before);
                }
                Crossing::Inside(x) => {
                    if before == at {
                        result.push_coalesced(x, true, before);
                    } else {
                        result.push_coalesced(x, false, before);
                        if at != after {
                            result.push_coalesced(x, true, at);
                        }
                    }
                    result.push_coalesced(upper_bound, include_upper_bound, after);
                }
            }

            lower_bound = upper_bound;
            include_lower_bound = !include_upper_bound;
        }

        event!(
            Level::TRACE,
            pieces = self.len(),
            result = result.len(),
            "compared piecewise function with a line"
        );
        result
    }
}

/// Errors that can occur when relating a PiecewiseFunction to a line
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RelationError {
    /// Error when less, equal and greater are all the same, so the result
    /// would be the constant given
    #[error("less, equal and greater are all {0}; the relation is constant")]
    Degenerate(bool),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piecewise::{DOMAIN_MAX, Piece};

    #[test]
    fn test_crossing_order() {
        // A single-point piece: the lower bound wins
        assert_eq!(Crossing::classify(1.0, 1.0, 1.0), Crossing::AtLower);
        assert_eq!(Crossing::classify(2.0, 1.0, 2.0), Crossing::AtUpper);
        assert_eq!(Crossing::classify(0.0, 1.0, 2.0), Crossing::Below);
        assert_eq!(Crossing::classify(3.0, 1.0, 2.0), Crossing::Above);
        assert_eq!(Crossing::classify(1.5, 1.0, 2.0), Crossing::Inside(1.5));
        // Infinite crossings from flat lines fall outside the domain
        assert_eq!(Crossing::classify(f64::INFINITY, 1.0, 2.0), Crossing::Above);
        assert_eq!(Crossing::classify(f64::NEG_INFINITY, DOMAIN_MIN, 2.0), Crossing::Below);
    }

    #[test]
    fn test_flags() {
        for relation in [
            Relation::Less,
            Relation::LessOrEqual,
            Relation::Equal,
            Relation::NotEqual,
            Relation::GreaterOrEqual,
            Relation::Greater,
        ] {
            let (l, e, g) = relation.flags();
            let (fl, fe, fg) = relation.flipped().flags();
            assert_eq!((l, e, g), (fg, fe, fl));
            assert_eq!(relation.flipped().flipped(), relation);
            assert!(!(l == e && e == g));
        }
    }

    #[test]
    fn test_degenerate() {
        let f = PiecewiseFunction::new();
        let line = LinearFunction::new(1.0, 0.0);
        assert_eq!(
            f.relate(&line, true, true, true).unwrap_err(),
            RelationError::Degenerate(true)
        );
        assert_eq!(
            f.relate(&line, false, false, false).unwrap_err(),
            RelationError::Degenerate(false)
        );
    }

    #[test]
    fn test_constant_greater_than_rising_line() {
        let one = PiecewiseFunction::from_pieces([Piece::new(DOMAIN_MAX, true, 1.0)]).unwrap();
        let line = LinearFunction::new(1.0, 0.0);

        let gt = one.compare_line(Relation::Greater, &line);
        assert_eq!(
            gt.pieces(),
            &[Piece::new(1.0, false, 1.0), Piece::new(DOMAIN_MAX, true, 0.0)]
        );

        let lt = one.compare_line(Relation::Less, &line);
        assert_eq!(
            lt.pieces(),
            &[Piece::new(1.0, true, 0.0), Piece::new(DOMAIN_MAX, true, 1.0)]
        );

        let eq = one.compare_line(Relation::Equal, &line);
        assert_eq!(
            eq.pieces(),
            &[
                Piece::new(1.0, false, 0.0),
                Piece::new(1.0, true, 1.0),
                Piece::new(DOMAIN_MAX, true, 0.0),
            ]
        );
    }

    #[test]
    fn test_flat_line() {
        let f = PiecewiseFunction::from_pieces([
            Piece::new(1.0, true, 1.0),
            Piece::new(2.0, true, 2.0),
            Piece::new(3.0, true, 3.0),
        ])
        .unwrap();
        let level = LinearFunction::new(0.0, 2.0);

        let ge = f.compare_line(Relation::GreaterOrEqual, &level);
        assert_eq!(
            ge.pieces(),
            &[
                Piece::new(1.0, true, 0.0),
                Piece::new(3.0, true, 1.0),
                Piece::new(DOMAIN_MAX, true, 0.0),
            ]
        );

        // The implicit tail compares as zero
        let below = LinearFunction::new(0.0, -1.0);
        let gt = f.compare_line(Relation::Greater, &below);
        assert_eq!(gt.pieces(), &[Piece::new(DOMAIN_MAX, true, 1.0)]);
    }

    #[test]
    fn test_line_first_comparison() {
        let one = PiecewiseFunction::from_pieces([Piece::new(DOMAIN_MAX, true, 1.0)]).unwrap();
        let line = LinearFunction::new(1.0, 0.0);
        // x > 1 exactly where 1 < x
        let a = line.compare(Relation::Greater, &one);
        let b = one.compare_line(Relation::Less, &line);
        assert_eq!(a.pieces(), b.pieces());
    }

    #[test]
    fn test_compare_functions() {
        let a = PiecewiseFunction::from_pieces([Piece::new(2.0, true, 1.0)]).unwrap();
        let b = PiecewiseFunction::from_pieces([Piece::new(1.0, true, 1.0)]).unwrap();
        let gt = a.compare(Relation::Greater, &b);
        assert_eq!(
            gt.pieces(),
            &[
                Piece::new(1.0, true, 0.0),
                Piece::new(2.0, true, 1.0),
                Piece::new(DOMAIN_MAX, true, 0.0),
            ]
        );
    }
}

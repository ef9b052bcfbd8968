use super::{MergeRule, Piece, PiecewiseFunction};
use crate::tolerance::ApproxEq as _;
use tracing::{Level, event};

/// One of the two functions taking part in an aligned walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    First,
    Second,
}

/// How the current pieces of the two cursors line up
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Same bound, same inclusion: both pieces end together
    Together,
    /// Same bound, but only the other side includes it; this side's piece
    /// finishes just before the shared bound
    ExclusiveBefore(Side),
    /// This side's piece ends strictly before the other's
    Earlier(Side),
}

impl Alignment {
    pub(crate) fn of(first: &Piece, second: &Piece) -> Self {
        if first.upper_bound.approx_eq(second.upper_bound) {
            match (first.include_upper_bound, second.include_upper_bound) {
                (true, false) => Self::ExclusiveBefore(Side::Second),
                (false, true) => Self::ExclusiveBefore(Side::First),
                _ => Self::Together,
            }
        } else if first.upper_bound < second.upper_bound {
            Self::Earlier(Side::First)
        } else {
            Self::Earlier(Side::Second)
        }
    }
}

/// The values the two functions take on an aligned sub-interval
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Values {
    Both(f64, f64),
    /// The second function has run out of explicit pieces
    First(f64),
    /// The first function has run out of explicit pieces
    Second(f64),
}

impl Values {
    pub(crate) fn apply<R: MergeRule + ?Sized>(self, rule: &R) -> f64 {
        match self {
            Self::Both(a, b) => rule.both(a, b),
            Self::First(a) => rule.first_only(a),
            Self::Second(b) => rule.second_only(b),
        }
    }

    /// Whether both functions are approximately equal here, counting a
    /// missing side as zero
    pub(crate) fn agree(self) -> bool {
        match self {
            Self::Both(a, b) => a.approx_eq(b),
            Self::First(v) | Self::Second(v) => v.approx_zero(),
        }
    }

    pub(crate) fn overlap(self) -> bool {
        match self {
            Self::Both(a, b) => !a.approx_zero() && !b.approx_zero(),
            _ => false,
        }
    }
}

/// A sub-interval on which both functions are constant
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Segment {
    pub upper_bound: f64,
    pub include_upper_bound: bool,
    pub values: Values,
}

/// Walks the explicit pieces of two functions in lock step, yielding the
/// common refinement of their breakpoints.
pub(crate) struct Aligned<'a> {
    first: &'a [Piece],
    second: &'a [Piece],
}

impl<'a> Aligned<'a> {
    pub(crate) fn new(first: &'a [Piece], second: &'a [Piece]) -> Self {
        Self { first, second }
    }
}

impl Iterator for Aligned<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        let segment = match (self.first.split_first(), self.second.split_first()) {
            (Some((a, first_rest)), Some((b, second_rest))) => {
                let values = Values::Both(a.value, b.value);
                match Alignment::of(a, b) {
                    Alignment::Together => {
                        self.first = first_rest;
                        self.second = second_rest;
                        Segment {
                            upper_bound: a.upper_bound,
                            include_upper_bound: a.include_upper_bound,
                            values,
                        }
                    }
                    // The including side still owns the single point at the
                    // bound, so only the excluding side moves on
                    Alignment::ExclusiveBefore(Side::First) | Alignment::Earlier(Side::First) => {
                        self.first = first_rest;
                        Segment {
                            upper_bound: a.upper_bound,
                            include_upper_bound: a.include_upper_bound,
                            values,
                        }
                    }
                    Alignment::ExclusiveBefore(Side::Second)
                    | Alignment::Earlier(Side::Second) => {
                        self.second = second_rest;
                        Segment {
                            upper_bound: b.upper_bound,
                            include_upper_bound: b.include_upper_bound,
                            values,
                        }
                    }
                }
            }
            (Some((a, rest)), None) => {
                self.first = rest;
                Segment {
                    upper_bound: a.upper_bound,
                    include_upper_bound: a.include_upper_bound,
                    values: Values::First(a.value),
                }
            }
            (None, Some((b, rest))) => {
                self.second = rest;
                Segment {
                    upper_bound: b.upper_bound,
                    include_upper_bound: b.include_upper_bound,
                    values: Values::Second(b.value),
                }
            }
            (None, None) => return None,
        };
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (a, b) = (self.first.len(), self.second.len());
        (a.max(b), Some(a + b))
    }
}

/// Combines two functions pointwise through `rule`.
///
/// The result always covers the whole domain: past both inputs it takes the
/// value `rule.both(0, 0)` up to and including `DOMAIN_MAX`.
pub(crate) fn combine<R: MergeRule + ?Sized>(
    first: &PiecewiseFunction,
    second: &PiecewiseFunction,
    rule: &R,
) -> PiecewiseFunction {
    let segments = Aligned::new(first.pieces(), second.pieces());
    let mut result = PiecewiseFunction::from_raw(Vec::with_capacity(segments.size_hint().0 + 1));
    for segment in segments {
        result.push_coalesced(
            segment.upper_bound,
            segment.include_upper_bound,
            segment.values.apply(rule),
        );
    }
    result.close_at_sentinel(rule.both(0.0, 0.0));

    event!(
        Level::TRACE,
        first = first.len(),
        second = second.len(),
        result = result.len(),
        "merged piecewise functions"
    );
    result
}

/// Returns `true` if some sub-interval has both functions non-zero
pub(crate) fn has_overlap(first: &PiecewiseFunction, second: &PiecewiseFunction) -> bool {
    Aligned::new(first.pieces(), second.pieces()).any(|segment| segment.values.overlap())
}

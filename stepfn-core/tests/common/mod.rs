#![allow(dead_code, unused_macros)]
use rstest::*;
use rstest_reuse::template;
use stepfn_core::{DOMAIN_MAX, Piece, PiecewiseFunction};

/// Builds a function from `(upper_bound, include_upper_bound, value)` triples
pub fn function(pieces: &[(f64, bool, f64)]) -> PiecewiseFunction {
    PiecewiseFunction::from_pieces(
        pieces
            .iter()
            .map(|&(upper_bound, include, value)| Piece::new(upper_bound, include, value)),
    )
    .unwrap()
}

// Integer-valued step functions over [0, 10), each excluding or including its
// breakpoints, in the style of the usual rounding functions.

#[fixture]
pub fn floor() -> PiecewiseFunction {
    function(&(1..=10).map(|i| (i as f64, false, (i - 1) as f64)).collect::<Vec<_>>())
}

#[fixture]
pub fn ceiling() -> PiecewiseFunction {
    function(&(1..=10).map(|i| (i as f64, true, i as f64)).collect::<Vec<_>>())
}

#[fixture]
pub fn round() -> PiecewiseFunction {
    function(&(0..6).map(|i| (i as f64 + 0.5, false, i as f64)).collect::<Vec<_>>())
}

#[fixture]
pub fn round_half_even() -> PiecewiseFunction {
    function(&(0..6).map(|i| (i as f64 + 0.5, i % 2 == 0, i as f64)).collect::<Vec<_>>())
}

#[fixture]
pub fn step_up() -> PiecewiseFunction {
    function(&(1..=5).map(|i| (i as f64, true, i as f64)).collect::<Vec<_>>())
}

#[fixture]
pub fn step_down() -> PiecewiseFunction {
    function(&(1..=5).map(|i| (i as f64, false, (6 - i) as f64)).collect::<Vec<_>>())
}

#[fixture]
pub fn less_than_five() -> PiecewiseFunction {
    function(&[(5.0, false, 1.0)])
}

#[fixture]
pub fn at_most_five() -> PiecewiseFunction {
    function(&[(5.0, true, 1.0)])
}

#[fixture]
pub fn above_two() -> PiecewiseFunction {
    function(&[(2.0, true, 0.0), (DOMAIN_MAX, true, 2.0)])
}

/// A sample of all the interesting functions above, plus some edge cases
pub fn catalogue() -> Vec<PiecewiseFunction> {
    vec![
        PiecewiseFunction::new(),
        function(&[(DOMAIN_MAX, true, 0.0)]),
        function(&[(DOMAIN_MAX, true, 1.0)]),
        function(&[(DOMAIN_MAX, false, -1.5)]),
        floor(),
        ceiling(),
        round(),
        round_half_even(),
        step_up(),
        step_down(),
        less_than_five(),
        at_most_five(),
        above_two(),
        function(&[(-3.0, true, 2.0), (0.0, false, -1.0), (0.0, true, 4.0), (2.5, true, 2.0)]),
    ]
}

/// Points at and around every finite breakpoint of the given functions
pub fn sample_points<'a>(functions: impl IntoIterator<Item = &'a PiecewiseFunction>) -> Vec<f64> {
    const DELTA: f64 = 1e-3;
    let mut points = vec![-1e6, -10.0, 0.0, 0.25, 10.0, 1e6];
    for f in functions {
        for piece in f {
            if piece.upper_bound.abs() < 1e6 {
                points.extend([
                    piece.upper_bound - DELTA,
                    piece.upper_bound,
                    piece.upper_bound + DELTA,
                ]);
            }
        }
    }
    points
}

/// Checks that the pieces would pass `add` validation and that the value at
/// every bound respects its inclusion flag
pub fn assert_boundaries(f: &PiecewiseFunction) {
    let pieces = f.pieces();
    if let Err(err) = PiecewiseFunction::from_pieces(pieces.iter().copied()) {
        panic!("{err} in {pieces:?}");
    }
    for (i, piece) in pieces.iter().enumerate() {
        let expected = if piece.include_upper_bound {
            piece.value
        } else {
            // The next piece with a later or included bound owns the point
            pieces[i + 1..]
                .iter()
                .find(|next| next.upper_bound > piece.upper_bound || next.include_upper_bound)
                .map_or(0.0, |next| next.value)
        };
        assert_eq!(
            f.evaluate(piece.upper_bound),
            Ok(expected),
            "value at bound {} of piece {i} in {:?}",
            piece.upper_bound,
            pieces
        );
    }
}

#[template]
#[rstest]
#[case::less(stepfn_core::Relation::Less)]
#[case::less_or_equal(stepfn_core::Relation::LessOrEqual)]
#[case::equal(stepfn_core::Relation::Equal)]
#[case::not_equal(stepfn_core::Relation::NotEqual)]
#[case::greater_or_equal(stepfn_core::Relation::GreaterOrEqual)]
#[case::greater(stepfn_core::Relation::Greater)]
pub fn all_relations(#[case] relation: stepfn_core::Relation) {}

#[template]
#[rstest]
#[case::sum(stepfn_core::Combinator::Sum)]
#[case::difference(stepfn_core::Combinator::Difference)]
#[case::product(stepfn_core::Combinator::Product)]
#[case::max(stepfn_core::Combinator::Max)]
#[case::min(stepfn_core::Combinator::Min)]
#[case::and(stepfn_core::Combinator::And)]
#[case::or(stepfn_core::Combinator::Or)]
#[case::xor(stepfn_core::Combinator::Xor)]
#[case::greater(stepfn_core::Combinator::Greater)]
#[case::greater_or_equal(stepfn_core::Combinator::GreaterOrEqual)]
#[case::less(stepfn_core::Combinator::Less)]
#[case::less_or_equal(stepfn_core::Combinator::LessOrEqual)]
#[case::equal(stepfn_core::Combinator::Equal)]
#[case::not_equal(stepfn_core::Combinator::NotEqual)]
pub fn pointwise_combinators(#[case] combinator: stepfn_core::Combinator) {}

use super::{Piece, PiecewiseFunction};
use crate::tolerance::ApproxEq as _;
use std::iter::Sum;
use tracing::{Level, event};

impl PiecewiseFunction {
    /// Adds any number of functions in a single simultaneous pass.
    ///
    /// Every input contributes its current piece value until its pieces run
    /// out, after which it contributes zero. Unlike the binary `+`, the result
    /// is not closed at the sentinel: it simply ends where the last input ends,
    /// leaving the usual implicit zero tail beyond.
    pub fn add_many<'a, I>(functions: I) -> Self
    where
        I: IntoIterator<Item = &'a PiecewiseFunction>,
    {
        let mut cursors: Vec<&[Piece]> = functions
            .into_iter()
            .map(PiecewiseFunction::pieces)
            .collect();
        let mut result = Self::from_raw(Vec::new());
        let mut ending: Vec<usize> = Vec::with_capacity(cursors.len());

        loop {
            let mut bound = f64::MAX;
            let mut total = 0.0;
            let mut active = false;
            ending.clear();

            for (i, pieces) in cursors.iter().enumerate() {
                let Some(piece) = pieces.first() else {
                    continue;
                };
                active = true;
                total += piece.value;

                if piece.upper_bound.approx_eq(bound) {
                    ending.push(i);
                } else if piece.upper_bound < bound {
                    ending.clear();
                    ending.push(i);
                    bound = piece.upper_bound;
                }
            }

            if !active {
                break;
            }

            // A tied piece that stops short of the bound finishes first; the
            // including pieces carry on to cover the single point.
            let exclusive = ending
                .iter()
                .any(|&i| !cursors[i][0].include_upper_bound);

            for &i in &ending {
                let pieces = cursors[i];
                if !exclusive || !pieces[0].include_upper_bound {
                    cursors[i] = &pieces[1..];
                }
            }

            result.push_coalesced(bound, !exclusive, total);
        }

        event!(
            Level::TRACE,
            functions = cursors.len(),
            result = result.len(),
            "summed piecewise functions"
        );
        result
    }
}

impl<'a> Sum<&'a PiecewiseFunction> for PiecewiseFunction {
    fn sum<I: Iterator<Item = &'a PiecewiseFunction>>(iter: I) -> Self {
        Self::add_many(iter)
    }
}

impl Sum for PiecewiseFunction {
    fn sum<I: Iterator<Item = PiecewiseFunction>>(iter: I) -> Self {
        let functions: Vec<_> = iter.collect();
        Self::add_many(&functions)
    }
}

use serde::Serialize;
use stepfn_core::PiecewiseFunction;

/// A summary of a single function
#[derive(Debug, PartialEq, Serialize)]
pub struct Report {
    pub pieces: usize,
    pub is_ever_non_zero: bool,
    pub reaches_sentinel: bool,
    pub lowest_non_zero_point: Option<f64>,
    pub highest_non_zero_point: Option<f64>,
    pub lowest_zero_point: Option<f64>,
    pub highest_zero_point: Option<f64>,
}

// The range queries answer NaN when there is no such point
fn point(x: f64) -> Option<f64> {
    (!x.is_nan()).then_some(x)
}

impl Report {
    pub fn of(function: &PiecewiseFunction) -> Self {
        Self {
            pieces: function.len(),
            is_ever_non_zero: function.is_ever_non_zero(),
            reaches_sentinel: function.reaches_sentinel(),
            lowest_non_zero_point: point(function.lowest_non_zero_point()),
            highest_non_zero_point: point(function.highest_non_zero_point()),
            lowest_zero_point: point(function.lowest_zero_point()),
            highest_zero_point: point(function.highest_zero_point()),
        }
    }
}

//! # Result Curves
//!
//! The engine's output contract: an ordered pair of equal-length numeric
//! sequences, non-decreasing in the independent variable, written once by
//! a driver and owned by the caller afterwards.

use serde::{Deserialize, Serialize};

/// A produced (x, y) curve. Fields are private so a curve cannot be
/// mutated after the driver hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultCurve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl ResultCurve {
    /// Assemble a curve from driver output.
    ///
    /// Both invariants (equal length, non-decreasing x) hold by
    /// construction in every driver; they are asserted here so a future
    /// driver bug fails loudly rather than producing a misleading curve.
    pub(crate) fn from_parts(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(x.len(), y.len(), "curve sequences must pair up");
        debug_assert!(
            x.windows(2).all(|w| w[0] <= w[1]),
            "independent variable must be non-decreasing"
        );
        ResultCurve { x, y }
    }

    /// Independent-variable sequence.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Dependent-variable sequence.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the curve carries no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over (x, y) pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Linear interpolation of a polyline onto `n` uniform stations spanning
/// its x range (endpoints clamped). Knot x values must be non-decreasing.
pub(crate) fn resample_linear(knots_x: &[f64], knots_y: &[f64], n: usize) -> ResultCurve {
    let lo = knots_x[0];
    let hi = knots_x[knots_x.len() - 1];
    let step = if n > 1 { (hi - lo) / (n - 1) as f64 } else { 0.0 };

    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let xi = lo + step * i as f64;
        x.push(xi);
        y.push(interp_clamped(xi, knots_x, knots_y));
    }
    ResultCurve::from_parts(x, y)
}

fn interp_clamped(x: f64, grid: &[f64], values: &[f64]) -> f64 {
    if x <= grid[0] {
        return values[0];
    }
    if x >= grid[grid.len() - 1] {
        return values[values.len() - 1];
    }
    let k = grid.partition_point(|&g| g <= x) - 1;
    let span = grid[k + 1] - grid[k];
    if span == 0.0 {
        return values[k + 1];
    }
    let t = (x - grid[k]) / span;
    values[k] + t * (values[k + 1] - values[k])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accessors() {
        let curve = ResultCurve::from_parts(vec![0.0, 1.0, 2.0], vec![0.0, 10.0, 15.0]);
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.x()[1], 1.0);
        assert_eq!(curve.points().last(), Some((2.0, 15.0)));
    }

    #[test]
    #[should_panic(expected = "pair up")]
    fn test_mismatched_lengths_rejected() {
        ResultCurve::from_parts(vec![0.0, 1.0], vec![0.0]);
    }

    #[test]
    fn test_resample_hits_knots() {
        let curve = resample_linear(&[0.0, 1.0, 2.0], &[0.0, 10.0, 0.0], 5);
        assert_eq!(curve.x(), &[0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(curve.y(), &[0.0, 5.0, 10.0, 5.0, 0.0]);
    }

    #[test]
    fn test_resample_handles_repeated_knot() {
        // a vertical drop: two knots at the same x resolve to the later value
        let curve = resample_linear(&[0.0, 1.0, 1.0, 2.0], &[0.0, 8.0, 4.0, 4.0], 9);
        assert_relative_eq!(curve.y()[4], 4.0);
        assert_relative_eq!(curve.y()[3], 6.0);
        assert_relative_eq!(curve.y()[8], 4.0);
    }

    #[test]
    fn test_serialization_shape() {
        let curve = ResultCurve::from_parts(vec![0.0, 1.0], vec![2.0, 3.0]);
        let json = serde_json::to_string(&curve).unwrap();
        assert_eq!(json, r#"{"x":[0.0,1.0],"y":[2.0,3.0]}"#);
    }
}

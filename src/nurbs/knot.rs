//! Knot vector utilities.

use crate::math::PARAM_TOL;

/// Check a knot vector against its curve direction:
/// non-decreasing, with length `n_ctrl + degree + 1`.
pub fn validate_knot_vector(knots: &[f64], degree: usize, n_ctrl: usize) -> bool {
    if knots.len() != n_ctrl + degree + 1 {
        return false;
    }
    knots.windows(2).all(|w| w[0] <= w[1])
}

/// Multiplicity of the knot value `t` in the vector.
pub fn knot_multiplicity(t: f64, knots: &[f64]) -> usize {
    knots.iter().filter(|&&k| (k - t).abs() < PARAM_TOL).count()
}

/// Build a clamped uniform knot vector on `[0, 1]`.
///
/// `degree + 1` zeros, `degree + 1` ones, interior knots evenly spaced.
/// Requires `n_ctrl > degree`; fewer control points than `degree + 1`
/// cannot carry a curve of that degree.
pub fn uniform_knots(degree: usize, n_ctrl: usize) -> Vec<f64> {
    assert!(n_ctrl > degree, "need at least degree+1 control points");
    let len = n_ctrl + degree + 1;
    let mut knots = vec![0.0; len];

    let interior = n_ctrl - degree - 1;
    for i in 0..interior {
        knots[degree + 1 + i] = (i + 1) as f64 / (interior + 1) as f64;
    }
    for k in knots.iter_mut().skip(n_ctrl) {
        *k = 1.0;
    }

    knots
}

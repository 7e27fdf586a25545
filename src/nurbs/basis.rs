//! Knot span search and Cox-de Boor basis function evaluation.
//!
//! These two routines carry every curve and surface evaluation in the
//! crate: locate the active span for a parameter, then compute the
//! `degree + 1` basis function values that are non-zero there.

/// Find the knot span index `s` such that `knots[s] <= t < knots[s+1]`.
///
/// `n` is the index of the last control point (`num_control_points - 1`)
/// and `p` the degree. Parameters at or below the domain start clamp to
/// span `p`; parameters at or beyond the domain end clamp to span `n`,
/// keeping the final interval closed. Binary search, O(log knots).
///
/// Callers must pre-clamp `t` to the domain `[knots[p], knots[n+1]]`;
/// interior out-of-range values are not validated here.
pub fn find_span(n: usize, p: usize, t: f64, knots: &[f64]) -> usize {
    if t >= knots[n + 1] {
        return n;
    }
    if t <= knots[p] {
        return p;
    }

    let mut low = p;
    let mut high = n + 1;
    let mut mid = (low + high) / 2;

    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }

    mid
}

/// Evaluate the `p + 1` non-zero basis functions at parameter `t`.
///
/// Returns `N[i] = N_{span-p+i, p}(t)` for `i = 0..=p`, built by the
/// triangular recurrence over increasing sub-degree. Within the valid
/// domain the values are non-negative and sum to 1 for any knot vector
/// whose end multiplicities do not exceed `p + 1`.
///
/// A zero-length knot interval contributes nothing to the two terms it
/// would divide, instead of producing NaN. That case only arises on
/// degenerate knot vectors; well-formed clamped or uniform vectors never
/// hit it.
pub fn basis_funs(span: usize, t: f64, p: usize, knots: &[f64]) -> Vec<f64> {
    let mut n = vec![0.0; p + 1];
    let mut left = vec![0.0; p + 1];
    let mut right = vec![0.0; p + 1];

    n[0] = 1.0;

    for j in 1..=p {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;

        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            if denom != 0.0 {
                let ratio = n[r] / denom;
                n[r] = saved + right[r + 1] * ratio;
                saved = left[j - r] * ratio;
            } else {
                n[r] = saved;
                saved = 0.0;
            }
        }
        n[j] = saved;
    }

    n
}

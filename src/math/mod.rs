//! Linear algebra type aliases and numeric tolerances.

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;

/// Parametric tolerance for knot comparisons.
pub const PARAM_TOL: f64 = 1e-12;

/// Smallest accepted rational weight sum. Below this the homogeneous
/// divide is considered degenerate.
pub const MIN_WEIGHT_SUM: f64 = 1e-12;

/// Smallest vector length that still normalizes meaningfully.
pub const MIN_VECTOR_LEN: f64 = 1e-12;

/// Parametric step for finite-difference tangent estimation.
pub const DERIV_STEP: f64 = 0.01;

/// Normal substituted when the differential estimate degenerates.
pub fn fallback_normal() -> Vector3 {
    Vector3::new(0.0, 0.0, 1.0)
}

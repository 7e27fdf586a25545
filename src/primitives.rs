//! Procedural descriptor producers.
//!
//! Hosts and tests use these to build curves and surfaces without going
//! through the IGES importer. All generators run through the validating
//! constructors, so a generator can only hand out well-formed
//! descriptors.

use crate::math::Point3;
use crate::nurbs::{knot, ControlPoint, EvalError, NurbsCurve, NurbsSurface};

/// Straight line segment as a degree-1 curve on knots `[0,0,1,1]`.
pub fn line_curve(start: Point3, end: Point3) -> Result<NurbsCurve, EvalError> {
    NurbsCurve::new(
        1,
        vec![ControlPoint::from(start), ControlPoint::from(end)],
        vec![0.0, 0.0, 1.0, 1.0],
    )
}

/// Flat bilinear patch in the XZ plane, centered at the origin.
pub fn plane_patch(width: f64, height: f64) -> Result<NurbsSurface, EvalError> {
    if width <= 0.0 {
        return Err(EvalError::NonPositiveDimension("width"));
    }
    if height <= 0.0 {
        return Err(EvalError::NonPositiveDimension("height"));
    }

    let (hw, hh) = (width / 2.0, height / 2.0);
    NurbsSurface::new(
        1,
        1,
        vec![
            vec![
                ControlPoint::new(-hw, 0.0, -hh),
                ControlPoint::new(-hw, 0.0, hh),
            ],
            vec![
                ControlPoint::new(hw, 0.0, -hh),
                ControlPoint::new(hw, 0.0, hh),
            ],
        ],
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 0.0, 1.0, 1.0],
    )
}

/// Cylinder-like patch: a quadratic-by-linear grid whose u rows sample a
/// full circle of the given radius at the bottom and top of the height.
///
/// The control points lie on the circle with unit weights, so the
/// surface sags slightly inside the true cylinder between samples. An
/// exact rational circle is out of scope here.
pub fn cylinder_patch(radius: f64, height: f64) -> Result<NurbsSurface, EvalError> {
    if radius <= 0.0 {
        return Err(EvalError::NonPositiveDimension("radius"));
    }
    if height <= 0.0 {
        return Err(EvalError::NonPositiveDimension("height"));
    }

    const NUM_U: usize = 7;
    let mut grid = Vec::with_capacity(NUM_U);
    for i in 0..NUM_U {
        let angle = i as f64 / (NUM_U - 1) as f64 * std::f64::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        grid.push(vec![
            ControlPoint::new(radius * cos, -height / 2.0, radius * sin),
            ControlPoint::new(radius * cos, height / 2.0, radius * sin),
        ]);
    }

    NurbsSurface::new(
        2,
        1,
        grid,
        knot::uniform_knots(2, NUM_U),
        vec![0.0, 0.0, 1.0, 1.0],
    )
}

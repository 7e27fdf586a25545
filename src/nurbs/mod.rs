//! NURBS (Non-Uniform Rational B-Spline) curves and surfaces.
//!
//! Descriptors are validated at construction and immutable afterwards.
//! Evaluation is rational: basis values weighted per control point and
//! normalized by the weight sum (homogeneous divide). Surface normals
//! come from symmetric finite differencing in parameter space.

pub mod basis;
pub mod knot;

use crate::math::{fallback_normal, Point3, Vector3, DERIV_STEP, MIN_VECTOR_LEN, MIN_WEIGHT_SUM};

/// A weighted control point in homogeneous (rational) coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub position: Point3,
    pub weight: f64,
}

impl ControlPoint {
    /// Control point with the default weight of 1.0.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            weight: 1.0,
        }
    }

    pub fn weighted(x: f64, y: f64, z: f64, weight: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            weight,
        }
    }
}

impl From<Point3> for ControlPoint {
    fn from(position: Point3) -> Self {
        Self {
            position,
            weight: 1.0,
        }
    }
}

/// Errors surfaced by descriptor construction and rational evaluation.
///
/// These are deterministic functions of the input descriptor; the fix is
/// always in the producer's data, never in retrying the call.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Descriptor has no control points.
    EmptyDescriptor,
    /// Fewer control points than `degree + 1`; no basis window fits and
    /// the span search has nothing valid to return.
    TooFewControlPoints {
        degree: usize,
        control_points: usize,
    },
    /// Knot vector length does not match `control_points + degree + 1`,
    /// or the values are not non-decreasing.
    KnotMismatch {
        knots: usize,
        degree: usize,
        control_points: usize,
    },
    /// A surface control-point row differs in length from the first row.
    RaggedGrid {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// All active control points have zero weight at the evaluated
    /// parameter; the homogeneous divide is undefined.
    DegenerateWeights,
    /// A procedural generator was given a non-positive dimension.
    NonPositiveDimension(&'static str),
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::EmptyDescriptor => write!(f, "descriptor has no control points"),
            EvalError::TooFewControlPoints {
                degree,
                control_points,
            } => write!(
                f,
                "degree {degree} needs at least {} control points, got {control_points}",
                degree + 1
            ),
            EvalError::KnotMismatch {
                knots,
                degree,
                control_points,
            } => write!(
                f,
                "invalid knot vector: {knots} knots for degree {degree} \
                 with {control_points} control points (need {} non-decreasing values)",
                control_points + degree + 1
            ),
            EvalError::RaggedGrid { row, len, expected } => write!(
                f,
                "control grid is not rectangular: row {row} has {len} points, expected {expected}"
            ),
            EvalError::DegenerateWeights => {
                write!(f, "invalid rational weights: active weights sum to zero")
            }
            EvalError::NonPositiveDimension(name) => {
                write!(f, "{name} must be positive")
            }
        }
    }
}

impl std::error::Error for EvalError {}

fn check_direction(knots: &[f64], degree: usize, n_ctrl: usize) -> Result<(), EvalError> {
    if n_ctrl == 0 {
        return Err(EvalError::EmptyDescriptor);
    }
    if n_ctrl <= degree {
        return Err(EvalError::TooFewControlPoints {
            degree,
            control_points: n_ctrl,
        });
    }
    if !knot::validate_knot_vector(knots, degree, n_ctrl) {
        return Err(EvalError::KnotMismatch {
            knots: knots.len(),
            degree,
            control_points: n_ctrl,
        });
    }
    Ok(())
}

/// A rational B-spline curve in 3D.
#[derive(Clone, Debug)]
pub struct NurbsCurve {
    pub degree: usize,
    pub control_points: Vec<ControlPoint>,
    pub knots: Vec<f64>,
}

impl NurbsCurve {
    /// Build a curve descriptor, failing fast on a malformed input
    /// rather than truncating or padding it.
    pub fn new(
        degree: usize,
        control_points: Vec<ControlPoint>,
        knots: Vec<f64>,
    ) -> Result<Self, EvalError> {
        check_direction(&knots, degree, control_points.len())?;
        Ok(Self {
            degree,
            control_points,
            knots,
        })
    }

    /// The parameter domain `[knots[degree], knots[n+1]]`.
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.knots.len() - self.degree - 1],
        )
    }

    pub fn num_control_points(&self) -> usize {
        self.control_points.len()
    }

    /// The raw control positions in order, for diagnostic overlay.
    pub fn control_polygon(&self) -> Vec<Point3> {
        self.control_points.iter().map(|cp| cp.position).collect()
    }

    /// Evaluate the curve at parameter `t`.
    ///
    /// `t` is expected to lie in [`Self::domain`]; the span search clamps
    /// at the two domain edges but does not validate interior values.
    pub fn evaluate(&self, t: f64) -> Result<Point3, EvalError> {
        let n = self.control_points.len() - 1;
        let span = basis::find_span(n, self.degree, t, &self.knots);
        let b = basis::basis_funs(span, t, self.degree, &self.knots);

        let mut numerator = Vector3::zeros();
        let mut denominator = 0.0;

        for (i, &bi) in b.iter().enumerate() {
            let cp = &self.control_points[span - self.degree + i];
            let wb = bi * cp.weight;
            numerator += wb * cp.position.coords;
            denominator += wb;
        }

        if denominator.abs() < MIN_WEIGHT_SUM {
            return Err(EvalError::DegenerateWeights);
        }
        Ok(Point3::from(numerator / denominator))
    }
}

/// A rational B-spline surface (tensor product of two curve directions).
#[derive(Clone, Debug)]
pub struct NurbsSurface {
    pub degree_u: usize,
    pub degree_v: usize,
    /// Control grid indexed `[i][j]`, `i` along u, `j` along v.
    pub control_points: Vec<Vec<ControlPoint>>,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
}

impl NurbsSurface {
    pub fn new(
        degree_u: usize,
        degree_v: usize,
        control_points: Vec<Vec<ControlPoint>>,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
    ) -> Result<Self, EvalError> {
        if control_points.is_empty() {
            return Err(EvalError::EmptyDescriptor);
        }
        let num_v = control_points[0].len();
        for (row, pts) in control_points.iter().enumerate() {
            if pts.len() != num_v {
                return Err(EvalError::RaggedGrid {
                    row,
                    len: pts.len(),
                    expected: num_v,
                });
            }
        }
        check_direction(&knots_u, degree_u, control_points.len())?;
        check_direction(&knots_v, degree_v, num_v)?;
        Ok(Self {
            degree_u,
            degree_v,
            control_points,
            knots_u,
            knots_v,
        })
    }

    pub fn num_control_points_u(&self) -> usize {
        self.control_points.len()
    }

    pub fn num_control_points_v(&self) -> usize {
        self.control_points[0].len()
    }

    /// Parameter domain in u.
    pub fn domain_u(&self) -> (f64, f64) {
        (
            self.knots_u[self.degree_u],
            self.knots_u[self.knots_u.len() - self.degree_u - 1],
        )
    }

    /// Parameter domain in v.
    pub fn domain_v(&self) -> (f64, f64) {
        (
            self.knots_v[self.degree_v],
            self.knots_v[self.knots_v.len() - self.degree_v - 1],
        )
    }

    /// Evaluate the surface at `(u, v)`.
    ///
    /// Both parameters are expected in-domain; see [`NurbsCurve::evaluate`]
    /// for the clamping contract.
    pub fn evaluate(&self, u: f64, v: f64) -> Result<Point3, EvalError> {
        let nu = self.control_points.len() - 1;
        let nv = self.control_points[0].len() - 1;

        let span_u = basis::find_span(nu, self.degree_u, u, &self.knots_u);
        let span_v = basis::find_span(nv, self.degree_v, v, &self.knots_v);
        let bu = basis::basis_funs(span_u, u, self.degree_u, &self.knots_u);
        let bv = basis::basis_funs(span_v, v, self.degree_v, &self.knots_v);

        let mut numerator = Vector3::zeros();
        let mut denominator = 0.0;

        for (i, &bui) in bu.iter().enumerate() {
            let row = &self.control_points[span_u - self.degree_u + i];
            for (j, &bvj) in bv.iter().enumerate() {
                let cp = &row[span_v - self.degree_v + j];
                let wb = bui * bvj * cp.weight;
                numerator += wb * cp.position.coords;
                denominator += wb;
            }
        }

        if denominator.abs() < MIN_WEIGHT_SUM {
            return Err(EvalError::DegenerateWeights);
        }
        Ok(Point3::from(numerator / denominator))
    }

    /// Unit tangent along u, estimated by a symmetric finite difference
    /// with step [`DERIV_STEP`], endpoints clamped to the domain.
    /// Returns the zero vector when the difference degenerates.
    pub fn tangent_u(&self, u: f64, v: f64) -> Result<Vector3, EvalError> {
        let (lo, hi) = self.domain_u();
        let a = self.evaluate((u - DERIV_STEP).max(lo), v)?;
        let b = self.evaluate((u + DERIV_STEP).min(hi), v)?;
        Ok(normalize_or_zero(b - a))
    }

    /// Unit tangent along v; same contract as [`Self::tangent_u`].
    pub fn tangent_v(&self, u: f64, v: f64) -> Result<Vector3, EvalError> {
        let (lo, hi) = self.domain_v();
        let a = self.evaluate(u, (v - DERIV_STEP).max(lo))?;
        let b = self.evaluate(u, (v + DERIV_STEP).min(hi))?;
        Ok(normalize_or_zero(b - a))
    }

    /// Unit surface normal at `(u, v)`: normalized cross product of the
    /// two finite-difference tangents.
    ///
    /// If either tangent or the cross product has near-zero length (flat
    /// spots, degenerate parameterization, domains narrower than twice
    /// the step), the `+Z` fallback normal is substituted so the caller
    /// always receives a unit vector.
    pub fn normal(&self, u: f64, v: f64) -> Result<Vector3, EvalError> {
        let tu = self.tangent_u(u, v)?;
        let tv = self.tangent_v(u, v)?;
        let cross = tu.cross(&tv);
        let len = cross.norm();
        if len < MIN_VECTOR_LEN {
            return Ok(fallback_normal());
        }
        Ok(cross / len)
    }
}

fn normalize_or_zero(v: Vector3) -> Vector3 {
    let len = v.norm();
    if len < MIN_VECTOR_LEN {
        Vector3::zeros()
    } else {
        v / len
    }
}

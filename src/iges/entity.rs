//! Entity parameter decoding.
//!
//! Parameter data arrives as one delimited string per directory entry.
//! A cursor walks the fields in order; running out of fields or hitting
//! a non-numeric token is a `BadParameter` error naming the entity.

use super::IgesError;
use crate::nurbs::{ControlPoint, NurbsCurve, NurbsSurface};

pub(super) struct Params {
    entity: usize,
    tokens: Vec<String>,
    pos: usize,
}

impl Params {
    pub(super) fn new(data: &str, param_delim: char, record_delim: char, entity: usize) -> Self {
        let body = data.split(record_delim).next().unwrap_or("");
        let tokens = body
            .split(param_delim)
            .map(|t| t.trim().to_string())
            .collect();
        Self {
            entity,
            tokens,
            pos: 0,
        }
    }

    fn next(&mut self, what: &str) -> Result<&str, IgesError> {
        let idx = self.pos;
        self.pos += 1;
        match self.tokens.get(idx) {
            Some(token) => Ok(token),
            None => Err(IgesError::BadParameter {
                entity: self.entity,
                what: format!("parameter data ended before {what}"),
            }),
        }
    }

    fn next_int(&mut self, what: &str) -> Result<i64, IgesError> {
        let entity = self.entity;
        let token = self.next(what)?;
        token.parse().map_err(|_| IgesError::BadParameter {
            entity,
            what: format!("{what}: invalid integer {token:?}"),
        })
    }

    fn next_count(&mut self, what: &str) -> Result<usize, IgesError> {
        let value = self.next_int(what)?;
        usize::try_from(value).map_err(|_| IgesError::BadParameter {
            entity: self.entity,
            what: format!("{what}: negative value {value}"),
        })
    }

    fn next_f64(&mut self, what: &str) -> Result<f64, IgesError> {
        let entity = self.entity;
        let token = self.next(what)?;
        // IGES real constants may carry Fortran 'D' exponents.
        let normalized = token.replace(['D', 'd'], "E");
        normalized.parse().map_err(|_| IgesError::BadParameter {
            entity,
            what: format!("{what}: invalid real {token:?}"),
        })
    }

    fn descriptor(&self, source: crate::nurbs::EvalError) -> IgesError {
        IgesError::Descriptor {
            entity: self.entity,
            source,
        }
    }
}

/// Type 126: rational B-spline curve.
///
/// Layout: `K` (upper control-point index), `M` (degree), three property
/// flags (the first marks a rational entity), `K+M+2` knots, `K+1`
/// weights when rational, then `K+1` coordinate triples. The trailing
/// parameter range and unit normal are not consumed.
pub(super) fn rational_bspline_curve(p: &mut Params) -> Result<NurbsCurve, IgesError> {
    let entity_type = p.next_int("entity type")?;
    debug_assert_eq!(entity_type, 126);

    let k = p.next_count("K")?;
    let m = p.next_count("M")?;
    let rational = p.next_int("PROP1")? == 1;
    let _closed = p.next_int("PROP2")?;
    let _periodic = p.next_int("PROP3")?;

    let mut knots = Vec::with_capacity(k + m + 2);
    for _ in 0..k + m + 2 {
        knots.push(p.next_f64("knot")?);
    }

    let mut weights = vec![1.0; k + 1];
    if rational {
        for w in weights.iter_mut() {
            *w = p.next_f64("weight")?;
        }
    }

    let mut control_points = Vec::with_capacity(k + 1);
    for w in weights {
        let x = p.next_f64("control point x")?;
        let y = p.next_f64("control point y")?;
        let z = p.next_f64("control point z")?;
        control_points.push(ControlPoint::weighted(x, y, z, w));
    }

    NurbsCurve::new(m, control_points, knots).map_err(|e| p.descriptor(e))
}

/// Type 128: rational B-spline surface.
///
/// Layout mirrors 126 per direction: `K1`/`K2` upper indices, `M1`/`M2`
/// degrees, five property flags, both knot vectors, then weights and
/// coordinate triples in second-index-outer order (all `i` for each
/// `j`), which is transposed here into the `[i][j]` grid.
pub(super) fn rational_bspline_surface(p: &mut Params) -> Result<NurbsSurface, IgesError> {
    let entity_type = p.next_int("entity type")?;
    debug_assert_eq!(entity_type, 128);

    let k1 = p.next_count("K1")?;
    let k2 = p.next_count("K2")?;
    let m1 = p.next_count("M1")?;
    let m2 = p.next_count("M2")?;
    let rational = p.next_int("PROP1")? == 1;
    for flag in ["PROP2", "PROP3", "PROP4", "PROP5"] {
        p.next_int(flag)?;
    }

    let mut knots_u = Vec::with_capacity(k1 + m1 + 2);
    for _ in 0..k1 + m1 + 2 {
        knots_u.push(p.next_f64("u knot")?);
    }
    let mut knots_v = Vec::with_capacity(k2 + m2 + 2);
    for _ in 0..k2 + m2 + 2 {
        knots_v.push(p.next_f64("v knot")?);
    }

    let (num_u, num_v) = (k1 + 1, k2 + 1);
    let mut weights = vec![vec![1.0; num_v]; num_u];
    if rational {
        for j in 0..num_v {
            for i in 0..num_u {
                weights[i][j] = p.next_f64("weight")?;
            }
        }
    }

    let mut grid = vec![Vec::with_capacity(num_v); num_u];
    for j in 0..num_v {
        for i in 0..num_u {
            let x = p.next_f64("control point x")?;
            let y = p.next_f64("control point y")?;
            let z = p.next_f64("control point z")?;
            grid[i].push(ControlPoint::weighted(x, y, z, weights[i][j]));
        }
    }

    NurbsSurface::new(m1, m2, grid, knots_u, knots_v).map_err(|e| p.descriptor(e))
}

/// Type 110: line, converted to a degree-1 curve on knots `[0,0,1,1]`.
pub(super) fn line(p: &mut Params) -> Result<NurbsCurve, IgesError> {
    let entity_type = p.next_int("entity type")?;
    debug_assert_eq!(entity_type, 110);

    let x1 = p.next_f64("start x")?;
    let y1 = p.next_f64("start y")?;
    let z1 = p.next_f64("start z")?;
    let x2 = p.next_f64("end x")?;
    let y2 = p.next_f64("end y")?;
    let z2 = p.next_f64("end z")?;

    NurbsCurve::new(
        1,
        vec![ControlPoint::new(x1, y1, z1), ControlPoint::new(x2, y2, z2)],
        vec![0.0, 0.0, 1.0, 1.0],
    )
    .map_err(|e| p.descriptor(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(data: &str) -> Params {
        Params::new(data, ',', ';', 7)
    }

    #[test]
    fn d_exponent_reals() {
        let mut p = params("1.5D1,2.5d-1;");
        assert_eq!(p.next_f64("a").unwrap(), 15.0);
        assert_eq!(p.next_f64("b").unwrap(), 0.25);
    }

    #[test]
    fn record_delimiter_ends_data() {
        let mut p = params("1,2;3,4");
        assert_eq!(p.next_int("a").unwrap(), 1);
        assert_eq!(p.next_int("b").unwrap(), 2);
        assert!(p.next_int("c").is_err());
    }

    #[test]
    fn exhaustion_names_entity() {
        let mut p = params("126;");
        p.next_int("entity type").unwrap();
        let err = p.next_int("K").unwrap_err();
        assert!(matches!(err, IgesError::BadParameter { entity: 7, .. }));
    }

    #[test]
    fn non_rational_curve_defaults_weights() {
        // Degree-1 line with two control points, PROP1 = 0.
        let mut p = params("126,1,1,0,0,0,0.,0.,1.,1.,0.,0.,0.,2.,0.,0.;");
        let curve = rational_bspline_curve(&mut p).unwrap();
        assert_eq!(curve.degree, 1);
        assert_eq!(curve.num_control_points(), 2);
        assert!(curve.control_points.iter().all(|cp| cp.weight == 1.0));
    }

    #[test]
    fn rational_curve_reads_weights() {
        let mut p = params("126,1,1,1,0,0,0.,0.,1.,1.,2.,0.5,0.,0.,0.,2.,0.,0.;");
        let curve = rational_bspline_curve(&mut p).unwrap();
        assert_eq!(curve.control_points[0].weight, 2.0);
        assert_eq!(curve.control_points[1].weight, 0.5);
    }

    #[test]
    fn surface_grid_is_transposed_from_file_order() {
        // Bilinear 2x2 patch; file order is all i for each j.
        let mut p = params(
            "128,1,1,1,1,0,0,0,0,0,\
             0.,0.,1.,1.,0.,0.,1.,1.,\
             0.,0.,0., 1.,0.,0., 0.,1.,0., 1.,1.,0.;",
        );
        let surface = rational_bspline_surface(&mut p).unwrap();
        assert_eq!(surface.num_control_points_u(), 2);
        assert_eq!(surface.num_control_points_v(), 2);
        // grid[1][0] is the second point of the first file row.
        assert_eq!(
            surface.control_points[1][0].position,
            crate::math::Point3::new(1.0, 0.0, 0.0)
        );
        assert_eq!(
            surface.control_points[0][1].position,
            crate::math::Point3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn line_entity_becomes_linear_curve() {
        let mut p = params("110,0.,0.,0.,3.,0.,4.;");
        let curve = line(&mut p).unwrap();
        assert_eq!(curve.degree, 1);
        assert_eq!(curve.knots, vec![0.0, 0.0, 1.0, 1.0]);
        let end = curve.evaluate(1.0).unwrap();
        assert_eq!(end, crate::math::Point3::new(3.0, 0.0, 4.0));
    }

    #[test]
    fn bad_knot_count_surfaces_as_descriptor_error() {
        // K=1, M=1 needs 4 knots; only 3 given before the points.
        let mut p = params("126,1,1,0,0,0,0.,0.,1.,0.,0.,0.,2.,0.,0.;");
        let err = rational_bspline_curve(&mut p).unwrap_err();
        // The fourth knot swallows a coordinate, leaving the point list
        // short — either failure shape names the entity.
        assert!(matches!(
            err,
            IgesError::BadParameter { entity: 7, .. } | IgesError::Descriptor { entity: 7, .. }
        ));
    }
}

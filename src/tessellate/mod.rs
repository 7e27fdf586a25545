//! Uniform tessellation of curves and surfaces into renderable meshes.
//!
//! Sampling is uniform in parameter space across the full domain. Every
//! sample is independent of every other, so the surface grid is
//! evaluated row-parallel; the only shared state is the read-only
//! descriptor.

use rayon::prelude::*;

use crate::math::{Point3, Vector3};
use crate::mesh::{ControlNet, CurveMesh, SurfaceMesh};
use crate::nurbs::{EvalError, NurbsCurve, NurbsSurface};

/// Lowest accepted tessellation resolution.
pub const MIN_RESOLUTION: u32 = 8;
/// Highest accepted tessellation resolution.
pub const MAX_RESOLUTION: u32 = 64;

/// Host-facing tessellation configuration.
///
/// `resolution` is the number of parameter-space segments per direction;
/// values outside `[MIN_RESOLUTION, MAX_RESOLUTION]` are clamped at use.
/// `emit_control_net` additionally attaches the raw control polygon
/// (curves) or control net polylines (surfaces) to the produced mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TessSettings {
    pub resolution: u32,
    pub emit_control_net: bool,
}

impl Default for TessSettings {
    fn default() -> Self {
        Self {
            resolution: 32,
            emit_control_net: false,
        }
    }
}

impl TessSettings {
    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    /// The resolution actually used, clamped to the supported range.
    pub fn effective_resolution(&self) -> u32 {
        self.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION)
    }
}

/// Sample a curve into an `R+1`-point polyline across its domain.
///
/// Pure function of its inputs; the returned mesh is a fresh value owned
/// by the caller.
pub fn tessellate_curve(
    curve: &NurbsCurve,
    settings: &TessSettings,
) -> Result<CurveMesh, EvalError> {
    let r = settings.effective_resolution() as usize;
    let (t0, t1) = curve.domain();

    let mut points = Vec::with_capacity(r + 1);
    for i in 0..=r {
        let t = t0 + (t1 - t0) * i as f64 / r as f64;
        points.push(curve.evaluate(t)?);
    }

    let control_polygon = settings
        .emit_control_net
        .then(|| curve.control_polygon());

    Ok(CurveMesh {
        points,
        control_polygon,
    })
}

/// Sample a surface into an `(R+1) x (R+1)` grid of point/normal pairs.
///
/// Triangle connectivity stays implicit in the grid (see
/// [`SurfaceMesh::triangle_indices`]); no drawing happens here.
pub fn tessellate_surface(
    surface: &NurbsSurface,
    settings: &TessSettings,
) -> Result<SurfaceMesh, EvalError> {
    let r = settings.effective_resolution() as usize;
    let (u0, u1) = surface.domain_u();
    let (v0, v1) = surface.domain_v();

    let rows: Vec<(Vec<Point3>, Vec<Vector3>)> = (0..=r)
        .into_par_iter()
        .map(|i| {
            let u = u0 + (u1 - u0) * i as f64 / r as f64;
            let mut pts = Vec::with_capacity(r + 1);
            let mut nrms = Vec::with_capacity(r + 1);
            for j in 0..=r {
                let v = v0 + (v1 - v0) * j as f64 / r as f64;
                pts.push(surface.evaluate(u, v)?);
                nrms.push(surface.normal(u, v)?);
            }
            Ok((pts, nrms))
        })
        .collect::<Result<_, EvalError>>()?;

    let mut points = Vec::with_capacity((r + 1) * (r + 1));
    let mut normals = Vec::with_capacity((r + 1) * (r + 1));
    for (pts, nrms) in rows {
        points.extend(pts);
        normals.extend(nrms);
    }

    let control_net = settings
        .emit_control_net
        .then(|| control_net_of(surface));

    Ok(SurfaceMesh {
        samples_u: r + 1,
        samples_v: r + 1,
        points,
        normals,
        control_net,
    })
}

/// Extract the raw control-grid polylines for overlay rendering.
fn control_net_of(surface: &NurbsSurface) -> ControlNet {
    let u_polylines: Vec<Vec<Point3>> = surface
        .control_points
        .iter()
        .map(|row| row.iter().map(|cp| cp.position).collect())
        .collect();

    let num_v = surface.num_control_points_v();
    let v_polylines: Vec<Vec<Point3>> = (0..num_v)
        .map(|j| {
            surface
                .control_points
                .iter()
                .map(|row| row[j].position)
                .collect()
        })
        .collect();

    ControlNet {
        u_polylines,
        v_polylines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nurbs::ControlPoint;

    #[test]
    fn resolution_clamps_both_ways() {
        assert_eq!(TessSettings::with_resolution(3).effective_resolution(), 8);
        assert_eq!(TessSettings::with_resolution(1000).effective_resolution(), 64);
        assert_eq!(TessSettings::with_resolution(20).effective_resolution(), 20);
    }

    #[test]
    fn default_settings() {
        let settings = TessSettings::default();
        assert_eq!(settings.resolution, 32);
        assert!(!settings.emit_control_net);
    }

    #[test]
    fn control_net_dimensions() {
        let patch = NurbsSurface::new(
            1,
            2,
            vec![
                vec![
                    ControlPoint::new(0.0, 0.0, 0.0),
                    ControlPoint::new(0.0, 1.0, 0.0),
                    ControlPoint::new(0.0, 2.0, 0.0),
                ],
                vec![
                    ControlPoint::new(1.0, 0.0, 0.0),
                    ControlPoint::new(1.0, 1.0, 0.0),
                    ControlPoint::new(1.0, 2.0, 0.0),
                ],
            ],
            vec![0.0, 0.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )
        .unwrap();

        let net = control_net_of(&patch);
        assert_eq!(net.u_polylines.len(), 2);
        assert_eq!(net.u_polylines[0].len(), 3);
        assert_eq!(net.v_polylines.len(), 3);
        assert_eq!(net.v_polylines[0].len(), 2);
    }
}

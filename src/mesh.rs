//! Mesh value types produced by tessellation.
//!
//! Each tessellation call returns a fresh mesh owned by the caller; the
//! evaluator retains nothing. Surfaces keep their sample grid so that
//! triangle connectivity stays implicit until a renderer asks for it.

use crate::math::{Point3, Vector3};

/// Sampled curve: an ordered polyline, optionally with the raw control
/// polygon for diagnostic overlay.
#[derive(Clone, Debug)]
pub struct CurveMesh {
    pub points: Vec<Point3>,
    pub control_polygon: Option<Vec<Point3>>,
}

/// Control-net overlay for a surface: polylines along each grid row
/// (u direction) and each grid column (v direction).
#[derive(Clone, Debug)]
pub struct ControlNet {
    pub u_polylines: Vec<Vec<Point3>>,
    pub v_polylines: Vec<Vec<Point3>>,
}

/// Sampled surface: an `samples_u x samples_v` grid of point/normal
/// pairs in row-major order (`points[i * samples_v + j]`), with implied
/// triangle connectivity.
#[derive(Clone, Debug)]
pub struct SurfaceMesh {
    pub samples_u: usize,
    pub samples_v: usize,
    pub points: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub control_net: Option<ControlNet>,
}

impl SurfaceMesh {
    pub fn point(&self, i: usize, j: usize) -> Point3 {
        self.points[i * self.samples_v + j]
    }

    pub fn normal(&self, i: usize, j: usize) -> Vector3 {
        self.normals[i * self.samples_v + j]
    }

    /// Triangulate the grid with the fixed diagonal rule: each quad
    /// `(i,j) (i+1,j) (i,j+1) (i+1,j+1)` splits into the two triangles
    /// sharing the `(i+1,j)-(i,j+1)` diagonal.
    pub fn triangle_indices(&self) -> Vec<[u32; 3]> {
        let mut tris = Vec::with_capacity(2 * (self.samples_u - 1) * (self.samples_v - 1));
        for i in 0..self.samples_u - 1 {
            for j in 0..self.samples_v - 1 {
                let a = (i * self.samples_v + j) as u32;
                let b = ((i + 1) * self.samples_v + j) as u32;
                let c = (i * self.samples_v + j + 1) as u32;
                let d = ((i + 1) * self.samples_v + j + 1) as u32;
                tris.push([a, b, c]);
                tris.push([b, d, c]);
            }
        }
        tris
    }

    /// Flatten into renderer-facing vertex/normal/index buffers.
    pub fn to_triangle_mesh(&self) -> TriangleMesh {
        let mut indices = Vec::with_capacity(6 * (self.samples_u - 1) * (self.samples_v - 1));
        for tri in self.triangle_indices() {
            indices.extend_from_slice(&tri);
        }
        TriangleMesh {
            vertices: self.points.clone(),
            normals: self.normals.clone(),
            indices,
        }
    }
}

/// A flat triangle mesh as consumed by renderers and exporters.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3>,
    /// Per-vertex unit normals, same length as `vertices`.
    pub normals: Vec<Vector3>,
    /// Every 3 consecutive values form one triangle.
    pub indices: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_mesh(nu: usize, nv: usize) -> SurfaceMesh {
        let mut points = Vec::new();
        let mut normals = Vec::new();
        for i in 0..nu {
            for j in 0..nv {
                points.push(Point3::new(i as f64, j as f64, 0.0));
                normals.push(Vector3::new(0.0, 0.0, 1.0));
            }
        }
        SurfaceMesh {
            samples_u: nu,
            samples_v: nv,
            points,
            normals,
            control_net: None,
        }
    }

    #[test]
    fn grid_accessors_are_row_major() {
        let mesh = grid_mesh(3, 4);
        assert_eq!(mesh.point(2, 1), Point3::new(2.0, 1.0, 0.0));
        assert_eq!(mesh.point(0, 3), Point3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn quad_count_and_diagonal() {
        let mesh = grid_mesh(3, 3);
        let tris = mesh.triangle_indices();
        assert_eq!(tris.len(), 2 * 2 * 2);

        // First quad: vertices 0,3,1,4 with the shared 3-1 diagonal.
        assert_eq!(tris[0], [0, 3, 1]);
        assert_eq!(tris[1], [3, 4, 1]);
    }

    #[test]
    fn flattening_preserves_counts() {
        let mesh = grid_mesh(4, 5);
        let flat = mesh.to_triangle_mesh();
        assert_eq!(flat.vertices.len(), 20);
        assert_eq!(flat.normals.len(), 20);
        assert_eq!(flat.indices.len(), 3 * 2 * 3 * 4);
    }
}

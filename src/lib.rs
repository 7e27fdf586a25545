//! Rational B-spline (NURBS) evaluation and tessellation.
//!
//! The crate turns curve and surface descriptors — degree, weighted
//! control points, knot vector — into renderable geometry: polylines for
//! curves, point/normal grids with implied triangle connectivity for
//! surfaces. Descriptors come from the [`iges`] importer or the
//! [`primitives`] generators; meshes go out through the [`render`] seam.
//!
//! Evaluation is pure and stateless per call. The only configuration is
//! [`tessellate::TessSettings`]: sampling resolution (clamped 8-64) and
//! the control-net overlay toggle.
//!
//! ```
//! use tessella::{primitives, tessellate, TessSettings};
//!
//! let patch = primitives::plane_patch(2.0, 2.0)?;
//! let mesh = tessellate::tessellate_surface(&patch, &TessSettings::default())?;
//! assert_eq!(mesh.points.len(), 33 * 33);
//! # Ok::<(), tessella::EvalError>(())
//! ```

pub mod iges;
pub mod math;
pub mod mesh;
pub mod nurbs;
pub mod primitives;
pub mod render;
pub mod tessellate;

pub use mesh::{ControlNet, CurveMesh, SurfaceMesh, TriangleMesh};
pub use nurbs::{ControlPoint, EvalError, NurbsCurve, NurbsSurface};
pub use render::Renderable;
pub use tessellate::{tessellate_curve, tessellate_surface, TessSettings};

//! Tessellation behavior observed through the public API: grid sizes,
//! resolution clamping, triangle connectivity, and overlays.

use approx::assert_relative_eq;
use tessella::math::Point3;
use tessella::{primitives, tessellate_curve, tessellate_surface, TessSettings};

#[test]
fn curve_polyline_has_resolution_plus_one_points() {
    let curve = primitives::line_curve(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
    )
    .unwrap();

    let mesh = tessellate_curve(&curve, &TessSettings::with_resolution(20)).unwrap();
    assert_eq!(mesh.points.len(), 21);
    assert!(mesh.control_polygon.is_none());

    // Uniform sampling of a line gives uniform spacing.
    for (i, p) in mesh.points.iter().enumerate() {
        assert_relative_eq!(p.x, i as f64 * 0.5, epsilon = 1e-12);
    }
}

#[test]
fn resolution_clamps_show_up_in_mesh_sizes() {
    let curve = primitives::line_curve(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
    )
    .unwrap();

    let low = tessellate_curve(&curve, &TessSettings::with_resolution(3)).unwrap();
    assert_eq!(low.points.len(), 9);

    let high = tessellate_curve(&curve, &TessSettings::with_resolution(1000)).unwrap();
    assert_eq!(high.points.len(), 65);
}

#[test]
fn surface_grid_and_triangle_counts() {
    let patch = primitives::plane_patch(2.0, 2.0).unwrap();
    let mesh = tessellate_surface(&patch, &TessSettings::with_resolution(16)).unwrap();

    assert_eq!(mesh.samples_u, 17);
    assert_eq!(mesh.samples_v, 17);
    assert_eq!(mesh.points.len(), 17 * 17);
    assert_eq!(mesh.normals.len(), 17 * 17);

    let tris = mesh.triangle_indices();
    assert_eq!(tris.len(), 2 * 16 * 16);

    let flat = mesh.to_triangle_mesh();
    assert_eq!(flat.indices.len(), 3 * tris.len());
    let max = flat.indices.iter().copied().max().unwrap();
    assert!((max as usize) < flat.vertices.len());
}

#[test]
fn default_resolution_matches_documented_grid() {
    let patch = primitives::plane_patch(1.0, 1.0).unwrap();
    let mesh = tessellate_surface(&patch, &TessSettings::default()).unwrap();
    assert_eq!(mesh.points.len(), 33 * 33);
    assert!(mesh.control_net.is_none());
}

#[test]
fn flat_patch_normals_are_axis_aligned_and_unit() {
    let patch = primitives::plane_patch(4.0, 4.0).unwrap();
    let mesh = tessellate_surface(&patch, &TessSettings::with_resolution(8)).unwrap();

    for n in &mesh.normals {
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert!(n.x.abs() < 1e-10 && n.z.abs() < 1e-10);
    }
}

#[test]
fn control_net_overlay_matches_descriptor_grid() {
    let patch = primitives::cylinder_patch(1.0, 2.0).unwrap();

    let settings = TessSettings {
        resolution: 8,
        emit_control_net: true,
    };
    let mesh = tessellate_surface(&patch, &settings).unwrap();

    let net = mesh.control_net.expect("overlay requested");
    assert_eq!(net.u_polylines.len(), 7);
    assert_eq!(net.u_polylines[0].len(), 2);
    assert_eq!(net.v_polylines.len(), 2);
    assert_eq!(net.v_polylines[0].len(), 7);

    let curve = primitives::line_curve(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
    )
    .unwrap();
    let polyline = tessellate_curve(&curve, &settings).unwrap();
    let polygon = polyline.control_polygon.expect("overlay requested");
    assert_eq!(polygon.len(), 2);
    assert_eq!(polygon[1], Point3::new(1.0, 1.0, 0.0));
}

#[test]
fn sampled_points_lie_on_the_plane() {
    let patch = primitives::plane_patch(3.0, 5.0).unwrap();
    let mesh = tessellate_surface(&patch, &TessSettings::with_resolution(10)).unwrap();

    for p in &mesh.points {
        assert!(p.y.abs() < 1e-13);
        assert!(p.x >= -1.5 - 1e-12 && p.x <= 1.5 + 1e-12);
        assert!(p.z >= -2.5 - 1e-12 && p.z <= 2.5 + 1e-12);
    }
}

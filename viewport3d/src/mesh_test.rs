#![allow(clippy::float_cmp)]

use super::*;
use crate::massing::ProjectSpec;

#[test]
fn box_has_eight_vertices_and_twelve_triangles() {
    let mesh = PlaceholderMesh::with_scale(Vec3::ONE);
    assert_eq!(mesh.positions.len(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.indices.iter().all(|i| usize::from(*i) < 8));
}

#[test]
fn every_vertex_is_used() {
    let mesh = PlaceholderMesh::with_scale(Vec3::ONE);
    for v in 0..8_u16 {
        assert!(mesh.indices.contains(&v), "vertex {v} unused");
    }
}

#[test]
fn scaled_to_massing_with_base_on_ground() {
    let massing = MassingBox::from_project(&ProjectSpec::default(), 3.3);
    let mesh = PlaceholderMesh::for_massing(&massing);
    let (min, max) = mesh.bounds();
    assert_eq!(min.y, 0.0);
    assert!((max.y - massing.height as f32).abs() < 1e-4);
    assert!((max.x - min.x - massing.width as f32).abs() < 1e-3);
    assert!((max.z - min.z - massing.depth as f32).abs() < 1e-3);
    assert!((min.x + max.x).abs() < 1e-5);
}

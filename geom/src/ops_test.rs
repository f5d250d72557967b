#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// =============================================================
// Distances
// =============================================================

#[test]
fn distance_and_midpoint() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(6.0, 8.0);
    assert_eq!(distance(a, b), 10.0);
    assert_eq!(midpoint(a, b), Point::new(3.0, 4.0));
}

#[test]
fn rotate_about_center() {
    let r = rotate_about(Point::new(2.0, 1.0), Point::new(1.0, 1.0), 90.0);
    assert!(approx_eq(r.x, 1.0));
    assert!(approx_eq(r.y, 2.0));
}

#[test]
fn project_clamps_to_segment_ends() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    assert_eq!(project_onto_segment(Point::new(5.0, 3.0), a, b), Point::new(5.0, 0.0));
    assert_eq!(project_onto_segment(Point::new(-4.0, 3.0), a, b), a);
    assert_eq!(project_onto_segment(Point::new(14.0, -1.0), a, b), b);
}

#[test]
fn project_onto_degenerate_segment() {
    let a = Point::new(2.0, 2.0);
    assert_eq!(project_onto_segment(Point::new(9.0, 9.0), a, a), a);
}

#[test]
fn distance_to_segment_perpendicular() {
    let d = distance_to_segment(Point::new(5.0, 3.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert_eq!(d, 3.0);
}

// =============================================================
// Polygons
// =============================================================

fn rect(w: f64, h: f64) -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(w, 0.0), Point::new(w, h), Point::new(0.0, h)]
}

#[test]
fn polygon_area_rectangle() {
    assert_eq!(polygon_area(&rect(10.0, 5.0)), 50.0);
}

#[test]
fn polygon_area_winding_independent() {
    let mut pts = rect(4.0, 3.0);
    pts.reverse();
    assert_eq!(polygon_area(&pts), 12.0);
}

#[test]
fn polygon_area_degenerate() {
    assert_eq!(polygon_area(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]), 0.0);
}

#[test]
fn polygon_contains_inside_and_outside() {
    let pts = rect(10.0, 5.0);
    assert!(polygon_contains(&pts, Point::new(5.0, 2.5)));
    assert!(!polygon_contains(&pts, Point::new(11.0, 2.5)));
    assert!(!polygon_contains(&pts, Point::new(5.0, -0.1)));
}

#[test]
fn polygon_contains_concave() {
    // L-shape with the notch at the top right.
    let pts = vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 2.0),
        Point::new(2.0, 2.0),
        Point::new(2.0, 4.0),
        Point::new(0.0, 4.0),
    ];
    assert!(polygon_contains(&pts, Point::new(1.0, 3.0)));
    assert!(!polygon_contains(&pts, Point::new(3.0, 3.0)));
}

// =============================================================
// Snapping primitives
// =============================================================

#[test]
fn snap_to_step_rounds() {
    assert!(approx_eq(snap_to_step(2.26, 0.5), 2.5));
    assert!(approx_eq(snap_to_step(-0.74, 0.5), -0.5));
}

#[test]
fn snap_to_step_zero_step_passthrough() {
    assert_eq!(snap_to_step(1.234, 0.0), 1.234);
}

#[test]
fn nearest_within_picks_closest() {
    assert_eq!(nearest_within(8.0, &[7.0, 8.1, 9.0], 0.5), Some(8.1));
}

#[test]
fn nearest_within_respects_threshold() {
    assert_eq!(nearest_within(8.0, &[9.0], 0.5), None);
}

#[test]
fn nearest_within_first_wins_tie() {
    assert_eq!(nearest_within(5.0, &[4.0, 6.0], 1.0), Some(4.0));
}

// =============================================================
// Angles
// =============================================================

#[test]
fn normalize_degrees_wraps() {
    assert_eq!(normalize_degrees(370.0), 10.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(0.0), 0.0);
}

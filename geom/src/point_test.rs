#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_length() {
    assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
}

#[test]
fn point_arithmetic() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(3.0, 5.0);
    assert_eq!(a + b, Point::new(4.0, 7.0));
    assert_eq!(b - a, Point::new(2.0, 3.0));
    assert_eq!(a * 2.0, Point::new(2.0, 4.0));
    assert_eq!(-a, Point::new(-1.0, -2.0));
}

#[test]
fn point_dot_and_perpendicular() {
    let v = Point::new(2.0, 1.0);
    assert_eq!(v.dot(v.perpendicular()), 0.0);
}

#[test]
fn normalized_zero_vector_is_none() {
    assert!(Point::new(0.0, 0.0).normalized().is_none());
}

#[test]
fn normalized_has_unit_length() {
    let n = Point::new(10.0, 0.0).normalized();
    assert_eq!(n, Some(Point::new(1.0, 0.0)));
}

#[test]
fn lerp_halfway() {
    let m = Point::new(0.0, 0.0).lerp(Point::new(4.0, 8.0), 0.5);
    assert_eq!(m, Point::new(2.0, 4.0));
}

#[test]
fn serde_shape_is_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap_or_default();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

#[test]
fn is_finite_rejects_nan() {
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(Point::new(0.0, 0.0).is_finite());
}

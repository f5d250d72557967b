#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_orders_corners() {
    let b = BBox::new(Point::new(5.0, 1.0), Point::new(2.0, 4.0));
    assert_eq!(b.min_x, 2.0);
    assert_eq!(b.min_y, 1.0);
    assert_eq!(b.max_x, 5.0);
    assert_eq!(b.max_y, 4.0);
}

#[test]
fn from_points_empty_is_none() {
    assert!(BBox::from_points(&[]).is_none());
}

#[test]
fn from_points_covers_every_point() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.0), Point::new(-1.0, 2.0)];
    let Some(b) = BBox::from_points(&pts) else {
        panic!("expected bbox");
    };
    assert_eq!(b, BBox { min_x: -1.0, min_y: 0.0, max_x: 10.0, max_y: 5.0 });
    assert_eq!(b.width(), 11.0);
    assert_eq!(b.height(), 5.0);
}

#[test]
fn single_point_box_is_degenerate() {
    let Some(b) = BBox::from_points(&[Point::new(3.0, 3.0)]) else {
        panic!("expected bbox");
    };
    assert_eq!(b.width(), 0.0);
    assert!(b.contains(Point::new(3.0, 3.0)));
}

#[test]
fn contains_is_inclusive() {
    let b = BBox::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
    assert!(b.contains(Point::new(2.0, 0.0)));
    assert!(!b.contains(Point::new(2.1, 0.0)));
}

#[test]
fn intersects_and_union() {
    let a = BBox::new(Point::new(0.0, 0.0), Point::new(2.0, 2.0));
    let b = BBox::new(Point::new(2.0, 2.0), Point::new(3.0, 3.0));
    let c = BBox::new(Point::new(5.0, 5.0), Point::new(6.0, 6.0));
    assert!(a.intersects(&b));
    assert!(!a.intersects(&c));
    assert_eq!(a.union(&c), BBox::new(Point::new(0.0, 0.0), Point::new(6.0, 6.0)));
}

#[test]
fn expand_and_shift() {
    let b = BBox::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0));
    assert_eq!(b.expand(1.0), BBox::new(Point::new(0.0, 0.0), Point::new(3.0, 3.0)));
    assert_eq!(b.shifted(Point::new(1.0, 1.0)), BBox::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)));
    assert_eq!(b.center(), Point::new(1.5, 1.5));
}

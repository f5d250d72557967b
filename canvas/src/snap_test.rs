#![allow(clippy::float_cmp)]

use plan_geom::Point;

use super::*;
use crate::doc::EditShape;

fn cache_with(grid_x: &[f64], grid_y: &[f64], threshold: f64) -> SnapCache {
    let mut cache = SnapCache::new(threshold, 0.1);
    cache.rebuild(grid_x, grid_y, &[], None);
    cache
}

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn snaps_to_nearby_grid_axis() {
    let cache = cache_with(&[8.1], &[5.0], 0.2);
    assert!(close(cache.snap_point(Point::new(8.0, 2.03)), Point::new(8.1, 2.0)));
}

#[test]
fn falls_back_to_step_rounding() {
    let cache = cache_with(&[8.1], &[5.0], 0.2);
    assert!(close(cache.snap_point(Point::new(3.26, 7.04)), Point::new(3.3, 7.0)));
}

#[test]
fn rounded_value_can_land_on_candidate() {
    // 8.24 is out of range of 8.0, but its step rounding 8.2 is in range.
    let cache = cache_with(&[8.0], &[], 0.22);
    let snapped = cache.snap_point(Point::new(8.24, 0.0));
    assert_eq!(snapped.x, 8.0);
    assert_eq!(cache.snap_point(snapped), snapped);
}

#[test]
fn snapping_is_idempotent() {
    let cache = cache_with(&[1.05, 4.0, 8.1], &[0.33, 2.5], 0.2);
    let mut x = -1.0;
    while x < 10.0 {
        let p = Point::new(x, x * 0.37);
        let once = cache.snap_point(p);
        assert!(close(cache.snap_point(once), once), "not idempotent at {p:?} -> {once:?}");
        x += 0.037;
    }
}

#[test]
fn nearest_candidate_wins() {
    let cache = cache_with(&[2.0, 2.3], &[], 0.2);
    assert_eq!(cache.snap_point(Point::new(2.2, 0.0)).x, 2.3);
    assert_eq!(cache.snap_point(Point::new(2.1, 0.0)).x, 2.0);
}

#[test]
fn disabled_cache_returns_input() {
    let mut cache = cache_with(&[8.1], &[], 0.2);
    cache.set_enabled(false);
    let raw = Point::new(8.03, 1.234);
    assert_eq!(cache.snap_point(raw), raw);
    assert!(!cache.enabled());
}

#[test]
fn element_anchors_are_candidates_unless_excluded() {
    let wall = EditElement::new(EditShape::Wall { start: Point::new(4.44, 1.0), end: Point::new(4.44, 6.0) });
    let mut cache = SnapCache::new(0.2, 0.1);
    cache.rebuild(&[], &[], std::slice::from_ref(&wall), None);
    assert_eq!(cache.snap_point(Point::new(4.5, 3.0)).x, 4.44);
    assert_eq!(cache.xs(), &[4.44]);
    assert_eq!(cache.ys(), &[1.0, 6.0]);

    cache.rebuild(&[], &[], std::slice::from_ref(&wall), Some(wall.id));
    assert!(cache.xs().is_empty());
    assert!((cache.snap_point(Point::new(4.5, 3.0)).x - 4.5).abs() < 1e-9);
}

#[test]
fn duplicates_collapse() {
    let cache = cache_with(&[3.0, 1.0, 3.0, f64::NAN], &[], 0.2);
    assert_eq!(cache.xs(), &[1.0, 3.0]);
}

#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn config() -> EngineConfig {
    EngineConfig::default()
}

// --- Defaults ---

#[test]
fn default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan(), Point::new(0.0, 0.0));
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.rotation, 0.0);
    assert_eq!(cam.screen_to_drawing(Point::new(12.0, 7.0)), Point::new(12.0, 7.0));
}

// --- Conversions ---

#[test]
fn screen_to_drawing_matches_pan_zoom_formula() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 4.0, rotation: 0.0 };
    let p = cam.screen_to_drawing(Point::new(140.0, 70.0));
    assert!(point_approx_eq(p, Point::new(10.0, 5.0)));
}

#[test]
fn conversions_are_inverse_under_rotation() {
    let cam = Camera { pan_x: -30.0, pan_y: 12.5, zoom: 2.75, rotation: 37.0 };
    let drawing = Point::new(3.25, -8.0);
    let back = cam.screen_to_drawing(cam.drawing_to_screen(drawing));
    assert!(point_approx_eq(back, drawing));
}

#[test]
fn transform_matches_drawing_to_screen() {
    let cam = Camera { pan_x: 5.0, pan_y: 6.0, zoom: 3.0, rotation: 90.0 };
    let p = Point::new(1.0, 2.0);
    assert!(point_approx_eq(cam.transform().apply(p), cam.drawing_to_screen(p)));
    // 90° turns +x toward +y: (1,2)·3 → (-6,3), then pan.
    assert!(point_approx_eq(cam.drawing_to_screen(p), Point::new(-1.0, 9.0)));
}

#[test]
fn drawing_delta_divides_by_zoom() {
    let cam = Camera { pan_x: 40.0, pan_y: 40.0, zoom: 8.0, rotation: 0.0 };
    assert!(point_approx_eq(cam.drawing_delta(Point::new(16.0, -8.0)), Point::new(2.0, -1.0)));
    assert!(approx_eq(cam.screen_dist_to_drawing(8.0), 1.0));
}

// --- Zoom ---

#[test]
fn zoom_keeps_pivot_stable() {
    let mut cam = Camera { pan_x: 13.0, pan_y: -4.0, zoom: 1.7, rotation: 15.0 };
    let pivot = Point::new(320.0, 210.0);
    let before = cam.screen_to_drawing(pivot);
    assert!(cam.zoom_by(pivot, 1.1, &config()));
    let after = cam.drawing_to_screen(before);
    assert!(point_approx_eq(after, pivot));
}

#[test]
fn zoom_pivot_stable_across_many_wheel_notches() {
    let mut cam = Camera::default();
    let pivot = Point::new(77.0, 19.0);
    let anchor = cam.screen_to_drawing(pivot);
    for i in 0..40 {
        cam.zoom_wheel(pivot, if i % 3 == 0 { 1.0 } else { -1.0 }, &config());
        assert!((cam.drawing_to_screen(anchor).x - pivot.x).abs() < 1e-6);
        assert!((cam.drawing_to_screen(anchor).y - pivot.y).abs() < 1e-6);
    }
}

#[test]
fn zoom_is_clamped() {
    let cfg = config();
    let mut cam = Camera::default();
    for _ in 0..200 {
        cam.zoom_wheel(Point::new(0.0, 0.0), -1.0, &cfg);
        assert!(cam.zoom <= cfg.max_zoom);
    }
    assert_eq!(cam.zoom, cfg.max_zoom);
    assert!(!cam.zoom_by(Point::new(0.0, 0.0), 2.0, &cfg));

    for _ in 0..400 {
        cam.zoom_wheel(Point::new(0.0, 0.0), 1.0, &cfg);
        assert!(cam.zoom >= cfg.min_zoom);
    }
    assert_eq!(cam.zoom, cfg.min_zoom);
}

#[test]
fn zoom_to_nan_clamps_to_min() {
    let cfg = config();
    let mut cam = Camera::default();
    cam.zoom_to(Point::new(0.0, 0.0), f64::NAN, &cfg);
    assert_eq!(cam.zoom, cfg.min_zoom);
}

#[test]
fn wheel_without_delta_is_noop() {
    let mut cam = Camera::default();
    assert!(!cam.zoom_wheel(Point::new(1.0, 1.0), 0.0, &config()));
    assert_eq!(cam, Camera::default());
}

// --- Fit ---

#[test]
fn fit_centers_with_margin() {
    let mut cam = Camera { rotation: 45.0, ..Camera::default() };
    let drawing = BBox::new(Point::new(0.0, 0.0), Point::new(40.0, 20.0));
    cam.fit_to_container(drawing, 800.0, 600.0, &config());
    // min(800/40, 600/20) · 0.9 = 18
    assert!(approx_eq(cam.zoom, 18.0));
    assert_eq!(cam.rotation, 0.0);
    let center = cam.drawing_to_screen(drawing.center());
    assert!(point_approx_eq(center, Point::new(400.0, 300.0)));
}

#[test]
fn fit_degenerate_drawing_uses_unit_zoom() {
    let mut cam = Camera::default();
    let drawing = BBox::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0));
    cam.fit_to_container(drawing, 100.0, 100.0, &config());
    assert_eq!(cam.zoom, 1.0);
    assert!(point_approx_eq(cam.drawing_to_screen(Point::new(5.0, 5.0)), Point::new(50.0, 50.0)));
}

// --- Pan / rotate ---

#[test]
fn pan_from_adds_screen_delta_to_start() {
    let mut cam = Camera { pan_x: 10.0, pan_y: 20.0, zoom: 3.0, rotation: 0.0 };
    let start = cam.pan();
    cam.pan_from(start, Point::new(30.0, -6.0));
    assert_eq!(cam.pan(), Point::new(40.0, 14.0));
    // The drawing moved by delta / zoom under the pointer.
    let moved = cam.screen_to_drawing(Point::new(0.0, 0.0));
    assert!(point_approx_eq(moved, Point::new(-40.0 / 3.0, -14.0 / 3.0)));
}

#[test]
fn rotation_wraps_and_keeps_pivot() {
    let mut cam = Camera { pan_x: 50.0, pan_y: 50.0, zoom: 2.0, rotation: 350.0 };
    let pivot = Point::new(200.0, 100.0);
    let anchor = cam.screen_to_drawing(pivot);
    cam.rotate_by(pivot, 20.0);
    assert!(approx_eq(cam.rotation, 10.0));
    assert!(point_approx_eq(cam.drawing_to_screen(anchor), pivot));
    cam.rotate_by(pivot, -370.0);
    assert!(approx_eq(cam.rotation, 0.0));
}

#[test]
fn visible_bounds_cover_viewport() {
    let cam = Camera { pan_x: 100.0, pan_y: 0.0, zoom: 10.0, rotation: 0.0 };
    let bounds = cam.visible_drawing_bounds(400.0, 300.0);
    assert!(approx_eq(bounds.min_x, -10.0));
    assert!(approx_eq(bounds.max_x, 30.0));
    assert!(approx_eq(bounds.min_y, 0.0));
    assert!(approx_eq(bounds.max_y, 30.0));
}

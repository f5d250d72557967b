//! Free-standing geometry operations: distances, projection, polygons,
//! snapping primitives, and angle normalisation.

#[cfg(test)]
#[path = "ops_test.rs"]
mod ops_test;

use crate::point::Point;

#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).length()
}

#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    a.lerp(b, 0.5)
}

/// Rotate `p` about `center` by `degrees` (positive turns +x toward +y).
#[must_use]
pub fn rotate_about(p: Point, center: Point, degrees: f64) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let v = p - center;
    Point::new(center.x + v.x * cos - v.y * sin, center.y + v.x * sin + v.y * cos)
}

/// Closest point to `p` on the segment `a`–`b`.
///
/// A zero-length segment projects every point onto `a`.
#[must_use]
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> Point {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq <= f64::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    distance(p, project_onto_segment(p, a, b))
}

/// Unsigned polygon area (shoelace). Fewer than three vertices yield zero.
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.x * q.y - q.x * p.y;
    }
    (twice * 0.5).abs()
}

/// Even-odd containment test; points exactly on an edge may land either way.
#[must_use]
pub fn polygon_contains(points: &[Point], p: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Round `value` to the nearest multiple of `step`. Non-positive steps pass through.
#[must_use]
pub fn snap_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }
    (value / step).round() * step
}

/// Candidate closest to `value` if it lies within `threshold`; the first wins ties.
#[must_use]
pub fn nearest_within(value: f64, candidates: &[f64], threshold: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for &c in candidates {
        let d = (c - value).abs();
        if d > threshold {
            continue;
        }
        match best {
            Some((_, best_d)) if best_d <= d => {}
            _ => best = Some((c, d)),
        }
    }
    best.map(|(c, _)| c)
}

/// Wrap an angle into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs due to rounding
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

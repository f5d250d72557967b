//! Snapping of drawing-space points to grid axes, element anchors, and a step.
//!
//! DESIGN
//! ======
//! Candidates are kept per axis: every structural grid position plus the
//! endpoints and anchors of existing edit elements. Snapping is separable, so
//! x and y resolve independently:
//!
//! 1. The nearest candidate within the threshold of the raw value wins.
//! 2. Otherwise the value is rounded to the grid step, and the nearest
//!    candidate within the threshold of that rounded value wins.
//! 3. Otherwise the rounded value is used as is.
//!
//! The result of every branch is either a candidate or a step multiple that
//! has no candidate in range, so snapping an already-snapped point returns it
//! unchanged.
//!
//! The cache is rebuilt whenever the drawing or the element set changes. During
//! a drag it is rebuilt without the dragged element so it cannot snap to itself.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use plan_geom::{Point, nearest_within, snap_to_step};

use crate::doc::{EditElement, ElementId};

/// Per-axis snap candidates and the active threshold.
#[derive(Debug, Clone)]
pub struct SnapCache {
    xs: Vec<f64>,
    ys: Vec<f64>,
    threshold: f64,
    grid_step: f64,
    enabled: bool,
}

impl Default for SnapCache {
    fn default() -> Self {
        Self::new(crate::consts::SNAP_THRESHOLD_MIN, crate::consts::GRID_STEP)
    }
}

impl SnapCache {
    #[must_use]
    pub fn new(threshold: f64, grid_step: f64) -> Self {
        Self { xs: Vec::new(), ys: Vec::new(), threshold, grid_step, enabled: true }
    }

    /// Recompute candidates from grid axes and element anchors, skipping `exclude`.
    pub fn rebuild(
        &mut self,
        grid_x: &[f64],
        grid_y: &[f64],
        elements: &[EditElement],
        exclude: Option<ElementId>,
    ) {
        self.xs = grid_x.to_vec();
        self.ys = grid_y.to_vec();
        for element in elements.iter().filter(|e| Some(e.id) != exclude) {
            for anchor in element.shape.anchors() {
                self.xs.push(anchor.x);
                self.ys.push(anchor.y);
            }
        }
        sort_dedup(&mut self.xs);
        sort_dedup(&mut self.ys);
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Snap a drawing-space point. Disabled snapping returns `p` unchanged.
    #[must_use]
    pub fn snap_point(&self, p: Point) -> Point {
        if !self.enabled {
            return p;
        }
        Point::new(self.snap_axis(p.x, &self.xs), self.snap_axis(p.y, &self.ys))
    }

    fn snap_axis(&self, value: f64, candidates: &[f64]) -> f64 {
        if let Some(hit) = nearest_within(value, candidates, self.threshold) {
            return hit;
        }
        let rounded = snap_to_step(value, self.grid_step);
        nearest_within(rounded, candidates, self.threshold).unwrap_or(rounded)
    }
}

fn sort_dedup(values: &mut Vec<f64>) {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
}

//! View transform between screen pixels and drawing space.
//!
//! The transform is `screen = rotate(drawing · zoom) + pan`: pan is stored in
//! CSS pixels, zoom is screen pixels per drawing unit, and rotation (degrees)
//! turns the drawing about the drawing origin. With zero rotation this reduces
//! to `drawing = (screen - pan) / zoom`.
//!
//! Rotation is a pure view concern. It never mutates element coordinates.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use plan_geom::{Affine2, BBox, Point, normalize_degrees};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Camera state for pan/zoom/rotate over the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    /// Degrees in `[0, 360)`.
    pub rotation: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, rotation: 0.0 }
    }
}

impl Camera {
    #[must_use]
    pub fn pan(&self) -> Point {
        Point::new(self.pan_x, self.pan_y)
    }

    /// Drawing → screen as an affine matrix (for renderers).
    #[must_use]
    pub fn transform(&self) -> Affine2 {
        Affine2::scale(self.zoom, self.zoom)
            .then(Affine2::rotate_deg(self.rotation))
            .then(Affine2::translate(self.pan_x, self.pan_y))
    }

    /// Convert a drawing-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn drawing_to_screen(&self, drawing: Point) -> Point {
        self.transform().apply(drawing)
    }

    /// Convert a screen-space point (CSS pixels) to drawing coordinates.
    #[must_use]
    pub fn screen_to_drawing(&self, screen: Point) -> Point {
        self.drawing_delta(screen - self.pan())
    }

    /// Convert a screen-space displacement to a drawing-space displacement.
    #[must_use]
    pub fn drawing_delta(&self, screen_delta: Point) -> Point {
        Affine2::rotate_deg(-self.rotation).apply_vector(screen_delta) * (1.0 / self.zoom)
    }

    /// Convert a screen-space distance (pixels) to drawing units.
    #[must_use]
    pub fn screen_dist_to_drawing(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Set the zoom, keeping the drawing point under `pivot` fixed on screen.
    /// Returns `true` if the zoom changed.
    pub fn zoom_to(&mut self, pivot: Point, zoom: f64, config: &EngineConfig) -> bool {
        let next = config.clamp_zoom(zoom);
        if (next - self.zoom).abs() <= f64::EPSILON * self.zoom {
            return false;
        }
        let anchor = self.screen_to_drawing(pivot);
        self.zoom = next;
        let moved = self.drawing_to_screen(anchor);
        self.pan_x += pivot.x - moved.x;
        self.pan_y += pivot.y - moved.y;
        true
    }

    /// Multiply the zoom by `factor` about `pivot`.
    pub fn zoom_by(&mut self, pivot: Point, factor: f64, config: &EngineConfig) -> bool {
        self.zoom_to(pivot, self.zoom * factor, config)
    }

    /// One wheel notch: `dy < 0` zooms in by the configured step.
    pub fn zoom_wheel(&mut self, pivot: Point, dy: f64, config: &EngineConfig) -> bool {
        if dy == 0.0 {
            return false;
        }
        let factor = if dy < 0.0 { config.zoom_step } else { 1.0 / config.zoom_step };
        self.zoom_by(pivot, factor, config)
    }

    /// Scale and center `drawing` inside a `container_w × container_h` viewport.
    /// Rotation is reset.
    pub fn fit_to_container(&mut self, drawing: BBox, container_w: f64, container_h: f64, config: &EngineConfig) {
        let (dw, dh) = (drawing.width(), drawing.height());
        self.rotation = 0.0;
        if dw <= 0.0 || dh <= 0.0 || container_w <= 0.0 || container_h <= 0.0 {
            self.zoom = config.clamp_zoom(1.0);
        } else {
            self.zoom = config.clamp_zoom((container_w / dw).min(container_h / dh) * config.fit_margin);
        }
        let center = drawing.center();
        self.pan_x = container_w / 2.0 - center.x * self.zoom;
        self.pan_y = container_h / 2.0 - center.y * self.zoom;
    }

    /// Set the pan to `start` plus a screen-space drag delta.
    pub fn pan_from(&mut self, start: Point, screen_delta: Point) {
        self.pan_x = start.x + screen_delta.x;
        self.pan_y = start.y + screen_delta.y;
    }

    /// Rotate the view by `degrees` about the screen point `pivot`.
    pub fn rotate_by(&mut self, pivot: Point, degrees: f64) {
        let anchor = self.screen_to_drawing(pivot);
        self.rotation = normalize_degrees(self.rotation + degrees);
        let moved = self.drawing_to_screen(anchor);
        self.pan_x += pivot.x - moved.x;
        self.pan_y += pivot.y - moved.y;
    }

    /// Drawing-space box covering a `container_w × container_h` viewport.
    #[must_use]
    pub fn visible_drawing_bounds(&self, container_w: f64, container_h: f64) -> BBox {
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(container_w, 0.0),
            Point::new(container_w, container_h),
            Point::new(0.0, container_h),
        ]
        .map(|p| self.screen_to_drawing(p));
        let mut bounds = BBox::new(corners[0], corners[0]);
        for p in &corners[1..] {
            bounds.include(*p);
        }
        bounds
    }
}

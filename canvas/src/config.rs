//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Camera, snapping, and hit-test parameters for an [`crate::engine::EngineCore`].
///
/// Every field defaults to the matching constant in [`crate::consts`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub fit_margin: f64,
    pub snap_threshold_ratio: f64,
    pub snap_threshold_min: f64,
    pub snap_threshold_max: f64,
    pub grid_step: f64,
    pub hit_slop_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_zoom: consts::MIN_ZOOM,
            max_zoom: consts::MAX_ZOOM,
            zoom_step: consts::ZOOM_STEP,
            fit_margin: consts::FIT_MARGIN,
            snap_threshold_ratio: consts::SNAP_THRESHOLD_RATIO,
            snap_threshold_min: consts::SNAP_THRESHOLD_MIN,
            snap_threshold_max: consts::SNAP_THRESHOLD_MAX,
            grid_step: consts::GRID_STEP,
            hit_slop_px: consts::HIT_SLOP_PX,
        }
    }
}

impl EngineConfig {
    /// Clamp a zoom factor into `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Snap distance for a drawing of the given size.
    #[must_use]
    pub fn snap_threshold(&self, width: f64, height: f64) -> f64 {
        let base = width.min(height).max(0.0) * self.snap_threshold_ratio;
        base.clamp(self.snap_threshold_min, self.snap_threshold_max)
    }
}

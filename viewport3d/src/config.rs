//! Viewport tuning knobs.

use std::time::Duration;

pub const DEFAULT_FLOOR_HEIGHT: f64 = 3.3;
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 33;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    /// Storey height in metres, used for massing height and floor clipping.
    pub floor_height: f64,
    /// Minimum time between rendered frames, in milliseconds.
    pub render_interval_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { floor_height: DEFAULT_FLOOR_HEIGHT, render_interval_ms: DEFAULT_RENDER_INTERVAL_MS }
    }
}

impl ViewportConfig {
    #[must_use]
    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}

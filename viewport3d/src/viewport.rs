//! 3D viewport state: what is shown, from where, and how much of it.
//!
//! DESIGN
//! ======
//! The viewport always has something to show. It starts with the placeholder
//! massing box and swaps in a model asset once one loads. A failed load keeps
//! (or restores) the placeholder. Floor visibility clips the view at a storey
//! height so upper floors can be peeled away.
//!
//! ERROR HANDLING
//! ==============
//! Asset failures are logged at `warn` and reported as
//! [`ContentKind::Placeholder`]; they never reach the caller as errors.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::time::Instant;

use glam::Vec3;
use tracing::{info, warn};

use crate::asset::ModelAsset;
use crate::camera::{CameraMode, OrbitCamera};
use crate::config::ViewportConfig;
use crate::error::AssetError;
use crate::massing::MassingBox;
use crate::mesh::PlaceholderMesh;
use crate::throttle::RenderThrottle;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewContent {
    Model(ModelAsset),
    Placeholder(PlaceholderMesh),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Model,
    Placeholder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FloorVisibility {
    #[default]
    All,
    /// Storeys 1..=n are shown.
    UpTo(u32),
}

/// Everything a renderer needs for one 3D frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub kind: ContentKind,
    pub eye: Vec3,
    pub target: Vec3,
    /// Height above which geometry is clipped, if any.
    pub clip_height: Option<f64>,
}

pub struct Viewport3d {
    config: ViewportConfig,
    massing: MassingBox,
    content: ViewContent,
    camera: OrbitCamera,
    floors: FloorVisibility,
    throttle: RenderThrottle,
}

impl Viewport3d {
    #[must_use]
    pub fn new(config: ViewportConfig, massing: MassingBox) -> Self {
        let mut viewport = Self {
            config,
            massing,
            content: ViewContent::Placeholder(PlaceholderMesh::for_massing(&massing)),
            camera: OrbitCamera::default(),
            floors: FloorVisibility::All,
            throttle: RenderThrottle::new(config.render_interval()),
        };
        viewport.frame_massing();
        viewport
    }

    /// Replace the massing. The placeholder is rebuilt; a loaded model stays.
    pub fn set_massing(&mut self, massing: MassingBox) {
        self.massing = massing;
        if matches!(self.content, ViewContent::Placeholder(_)) {
            self.content = ViewContent::Placeholder(PlaceholderMesh::for_massing(&massing));
        }
        self.floors = self.clamp_floors(self.floors);
        self.frame_massing();
    }

    /// Apply a model load result, falling back to the placeholder on failure.
    pub fn apply_model(&mut self, result: Result<ModelAsset, AssetError>) -> ContentKind {
        match result {
            Ok(asset) => {
                info!(bytes = asset.len(), format = ?asset.format, "model asset loaded");
                self.content = ViewContent::Model(asset);
            }
            Err(e) => {
                warn!(error = %e, "model asset failed; showing placeholder massing");
                self.content = ViewContent::Placeholder(PlaceholderMesh::for_massing(&self.massing));
            }
        }
        self.throttle.invalidate();
        self.content_kind()
    }

    #[must_use]
    pub fn config(&self) -> ViewportConfig {
        self.config
    }

    /// Drop a loaded model and show the placeholder massing again.
    pub fn clear_model(&mut self) {
        if matches!(self.content, ViewContent::Model(_)) {
            self.content = ViewContent::Placeholder(PlaceholderMesh::for_massing(&self.massing));
            self.throttle.invalidate();
        }
    }

    /// Classify and apply raw model bytes.
    pub fn load_model_bytes(&mut self, bytes: Vec<u8>) -> ContentKind {
        self.apply_model(ModelAsset::from_bytes(bytes))
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera.set_mode(mode);
        self.throttle.invalidate();
    }

    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.camera.orbit(delta_yaw, delta_pitch);
        self.throttle.invalidate();
    }

    pub fn zoom(&mut self, factor: f32) {
        self.camera.zoom(factor);
        self.throttle.invalidate();
    }

    pub fn set_floor_visibility(&mut self, floors: FloorVisibility) {
        self.floors = self.clamp_floors(floors);
        self.throttle.invalidate();
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.throttle.set_animating(animating);
    }

    /// Frame to draw at `now`, or `None` when throttled or idle.
    pub fn frame(&mut self, now: Instant) -> Option<FrameInfo> {
        if !self.throttle.should_render(now) {
            return None;
        }
        Some(FrameInfo {
            kind: self.content_kind(),
            eye: self.camera.eye(),
            target: self.camera.target,
            clip_height: self.clip_height(),
        })
    }

    #[must_use]
    pub fn content(&self) -> &ViewContent {
        &self.content
    }

    #[must_use]
    pub fn content_kind(&self) -> ContentKind {
        match self.content {
            ViewContent::Model(_) => ContentKind::Model,
            ViewContent::Placeholder(_) => ContentKind::Placeholder,
        }
    }

    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    #[must_use]
    pub fn massing(&self) -> &MassingBox {
        &self.massing
    }

    #[must_use]
    pub fn floor_visibility(&self) -> FloorVisibility {
        self.floors
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.throttle.frames_rendered()
    }

    /// Clip height for the current floor visibility. `None` shows everything.
    #[must_use]
    pub fn clip_height(&self) -> Option<f64> {
        match self.floors {
            FloorVisibility::All => None,
            FloorVisibility::UpTo(n) => Some(f64::from(n) * self.config.floor_height),
        }
    }

    fn clamp_floors(&self, floors: FloorVisibility) -> FloorVisibility {
        match floors {
            FloorVisibility::All => FloorVisibility::All,
            FloorVisibility::UpTo(n) => FloorVisibility::UpTo(n.clamp(1, self.massing.floor_count())),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn frame_massing(&mut self) {
        let half = Vec3::new(self.massing.width as f32 / 2.0, 0.0, self.massing.depth as f32 / 2.0);
        let top = Vec3::new(half.x, self.massing.height as f32, half.z);
        self.camera.fit_to_bounds(-half, top);
        self.throttle.invalidate();
    }
}

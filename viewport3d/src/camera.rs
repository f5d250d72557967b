//! Orbit camera around the massing, Y up.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

const PITCH_LIMIT_DEG: f32 = 89.0;
const TOP_PITCH_DEG: f32 = 89.0;
const DEFAULT_YAW_DEG: f32 = 45.0;
const DEFAULT_PITCH_DEG: f32 = 30.0;
const FIT_MARGIN: f32 = 1.2;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 5000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraMode {
    /// Free orbit controlled by the user.
    #[default]
    Orbit,
    /// Looking straight down at the roof.
    Top,
    /// Looking along -Z at the front elevation.
    Front,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Radians around Y.
    pub yaw: f32,
    /// Radians above the ground plane.
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub mode: CameraMode,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 100.0,
            yaw: DEFAULT_YAW_DEG.to_radians(),
            pitch: DEFAULT_PITCH_DEG.to_radians(),
            fov: 45.0,
            aspect_ratio: 1.0,
            mode: CameraMode::Orbit,
        }
    }
}

impl OrbitCamera {
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Rotate in orbit mode. Preset modes ignore orbiting.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if self.mode != CameraMode::Orbit {
            return;
        }
        let limit = PITCH_LIMIT_DEG.to_radians();
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-limit, limit);
    }

    pub fn zoom(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.distance = (self.distance / factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
        match mode {
            CameraMode::Orbit => {
                self.yaw = DEFAULT_YAW_DEG.to_radians();
                self.pitch = DEFAULT_PITCH_DEG.to_radians();
            }
            CameraMode::Top => {
                self.yaw = 0.0;
                self.pitch = TOP_PITCH_DEG.to_radians();
            }
            CameraMode::Front => {
                self.yaw = 0.0;
                self.pitch = 0.0;
            }
        }
    }

    /// Center on the bounds and back off until the largest side fits the view.
    pub fn fit_to_bounds(&mut self, min: Vec3, max: Vec3) {
        self.target = (min + max) * 0.5;
        let max_dim = (max - min).max_element();
        let half_fov = (self.fov.to_radians() / 2.0).tan();
        self.distance = (max_dim * FIT_MARGIN / half_fov).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, 0.1, self.distance * 10.0)
    }
}

//! Placeholder box mesh shown when no model asset is available.
//!
//! A unit box spanning x and z in [-0.5, 0.5] and y in [0, 1] (Y up, base on
//! the ground), scaled per axis to the massing's width, height and depth.

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;

use glam::Vec3;

use crate::massing::MassingBox;

const UNIT_POSITIONS: [Vec3; 8] = [
    Vec3::new(-0.5, 0.0, -0.5),
    Vec3::new(0.5, 0.0, -0.5),
    Vec3::new(0.5, 0.0, 0.5),
    Vec3::new(-0.5, 0.0, 0.5),
    Vec3::new(-0.5, 1.0, -0.5),
    Vec3::new(0.5, 1.0, -0.5),
    Vec3::new(0.5, 1.0, 0.5),
    Vec3::new(-0.5, 1.0, 0.5),
];

#[rustfmt::skip]
const INDICES: [u16; 36] = [
    0, 1, 2, 2, 3, 0,
    4, 5, 6, 6, 7, 4,
    0, 1, 5, 5, 4, 0,
    1, 2, 6, 6, 5, 1,
    2, 3, 7, 7, 6, 2,
    3, 0, 4, 4, 7, 3,
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderMesh {
    pub positions: [Vec3; 8],
    pub indices: [u16; 36],
    pub scale: Vec3,
}

impl PlaceholderMesh {
    #[must_use]
    pub fn with_scale(scale: Vec3) -> Self {
        Self { positions: UNIT_POSITIONS.map(|p| p * scale), indices: INDICES, scale }
    }

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn for_massing(massing: &MassingBox) -> Self {
        Self::with_scale(Vec3::new(massing.width as f32, massing.height as f32, massing.depth as f32))
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions.iter().fold((Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)), |(lo, hi), p| (lo.min(*p), hi.max(*p)))
    }
}

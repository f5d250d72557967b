//! Massing box derived from project parameters.
//!
//! DESIGN
//! ======
//! The generator sizes a rectangular block from gross floor area, floor count
//! and building type: a per-type plan ratio stretches the square root of the
//! floor plate into width and depth, a per-type structural module sets the
//! grid spacing, and a per-type core ratio is the default share of the plate
//! given to the core. The viewer rebuilds the same box so the placeholder
//! matches what the generator would have produced.
//!
//! Project fields arrive as free text ("12 floors", "18000"). Numbers are read
//! by keeping only digits and dots; anything that then fails to parse uses the
//! default.

#[cfg(test)]
#[path = "massing_test.rs"]
mod massing_test;

use serde::{Deserialize, Serialize};

const DEFAULT_FLOORS: f64 = 8.0;
const DEFAULT_GFA: f64 = 18_000.0;
const MIN_WIDTH: f64 = 18.0;
const MIN_DEPTH: f64 = 14.0;
const MIN_HEIGHT: f64 = 12.0;
const CORE_RATIO_MIN: f64 = 0.12;
const CORE_RATIO_MAX: f64 = 0.35;
const CORE_WIDTH_SHARE: f64 = 0.32;
const CORE_DEPTH_SHARE_MAX: f64 = 0.6;
const MIN_GRID_LINES: u32 = 3;
const EGYPT_MODULE_FACTOR: f64 = 0.95;

/// Free-text project fields the massing depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSpec {
    pub building_type: String,
    pub region: String,
    pub floors: String,
    pub gfa: String,
    /// Core share in percent.
    pub core_ratio: String,
}

/// Plan proportions for one family of building types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeProfile {
    pub ratio: f64,
    pub module: f64,
    pub core_ratio: f64,
}

impl TypeProfile {
    /// Profile for a building type, matched by keyword.
    #[must_use]
    pub fn for_building_type(building_type: &str) -> Self {
        let t = building_type.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| t.contains(w));
        let (ratio, module, core_ratio) = if has(&["residential", "apartment"]) {
            (1.55, 6.0, 0.18)
        } else if has(&["hospital", "health"]) {
            (1.25, 8.0, 0.28)
        } else if has(&["education"]) {
            (1.4, 7.2, 0.22)
        } else if has(&["hospitality", "hotel"]) {
            (1.3, 6.8, 0.2)
        } else if has(&["mixed"]) {
            (1.28, 7.2, 0.24)
        } else {
            (1.2, 7.5, 0.24)
        };
        Self { ratio, module, core_ratio }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassingBox {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub floors: f64,
    pub floor_area: f64,
    pub core_ratio: f64,
    pub module: f64,
    pub grid_x: u32,
    pub grid_y: u32,
}

/// Plan rectangle of the core, centred in the footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoreRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub depth: f64,
}

impl MassingBox {
    #[must_use]
    pub fn from_project(project: &ProjectSpec, floor_height: f64) -> Self {
        let floors = loose_number(&project.floors).unwrap_or(DEFAULT_FLOORS);
        let gfa = loose_number(&project.gfa).unwrap_or(DEFAULT_GFA);
        let floor_area = gfa / floors.max(1.0);

        let profile = TypeProfile::for_building_type(&project.building_type);
        let module = if project.region.to_lowercase().contains("egypt") {
            profile.module * EGYPT_MODULE_FACTOR
        } else {
            profile.module
        };

        let side = floor_area.sqrt();
        let width = (side / profile.ratio).max(MIN_WIDTH);
        let depth = (side * profile.ratio).max(MIN_DEPTH);

        let core_ratio = (loose_number(&project.core_ratio).unwrap_or(profile.core_ratio * 100.0) / 100.0)
            .clamp(CORE_RATIO_MIN, CORE_RATIO_MAX);

        Self {
            width,
            depth,
            height: (floors * floor_height).max(MIN_HEIGHT),
            floors,
            floor_area,
            core_ratio,
            module,
            grid_x: grid_lines(width, module),
            grid_y: grid_lines(depth, module),
        }
    }

    /// Whole storeys, at least one.
    #[must_use]
    pub fn floor_count(&self) -> u32 {
        whole(self.floors).max(1)
    }

    #[must_use]
    pub fn core(&self) -> CoreRect {
        let width = self.width * CORE_WIDTH_SHARE;
        let area = self.width * self.depth * self.core_ratio;
        let depth = (area / width.max(1.0)).min(self.depth * CORE_DEPTH_SHARE_MAX);
        CoreRect { x: (self.width - width) / 2.0, y: (self.depth - depth) / 2.0, width, depth }
    }
}

/// Parse free text by keeping only digits and dots.
#[must_use]
pub fn loose_number(raw: &str) -> Option<f64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn grid_lines(extent: f64, module: f64) -> u32 {
    (whole(extent / module) + 1).max(MIN_GRID_LINES)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 { value.floor().min(f64::from(u32::MAX)) as u32 } else { 0 }
}

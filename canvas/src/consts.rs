//! Shared numeric constants for the canvas crate.
//!
//! These are defaults for [`crate::config::EngineConfig`]. The snap constants
//! in particular are tuning values, not derived quantities.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor (screen px per drawing unit).
pub const MIN_ZOOM: f64 = 0.1;

/// Largest allowed zoom factor.
pub const MAX_ZOOM: f64 = 50.0;

/// Multiplicative zoom step per wheel notch or toolbar click.
pub const ZOOM_STEP: f64 = 1.1;

/// Fraction of the container a fitted drawing fills.
pub const FIT_MARGIN: f64 = 0.9;

// ── Snapping ────────────────────────────────────────────────────

/// Snap threshold as a fraction of the smaller drawing dimension.
pub const SNAP_THRESHOLD_RATIO: f64 = 0.01;

/// Lower bound on the snap threshold, in drawing units.
pub const SNAP_THRESHOLD_MIN: f64 = 0.15;

/// Upper bound on the snap threshold, in drawing units.
pub const SNAP_THRESHOLD_MAX: f64 = 0.6;

/// Rounding step applied when no snap candidate is in range.
pub const GRID_STEP: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for thin lines and text anchors.
pub const HIT_SLOP_PX: f64 = 8.0;

// ── Annotations ─────────────────────────────────────────────────

/// Door swing width bounds, in drawing units.
pub const DOOR_MIN_WIDTH: f64 = 0.8;
pub const DOOR_MAX_WIDTH: f64 = 1.4;

/// Perpendicular gap between the two strokes of a window symbol.
pub const WINDOW_GAP: f64 = 0.15;

/// Half-length of a dimension end tick.
pub const DIMENSION_TICK: f64 = 0.2;

/// Label used when a text gesture commits without typed content.
pub const DEFAULT_TEXT_LABEL: &str = "Label";

/// Maximum undo snapshots kept; the oldest are dropped first.
pub const HISTORY_LIMIT: usize = 200;

/// Font size of user text labels, in drawing units.
pub const TEXT_SIZE: f64 = 0.4;

/// Approximate glyph advance as a fraction of the font size.
pub const TEXT_ADVANCE: f64 = 0.6;

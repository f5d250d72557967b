//! Geometry kernel for the floor-plan viewer.
//!
//! Pure 2D math shared by the drawing parser, the edit engine, and the
//! renderer. Nothing in this crate holds state: every function takes its
//! inputs by value or reference and returns a fresh result.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`point`] | `Point` and vector arithmetic |
//! | [`bbox`] | Axis-aligned bounding boxes |
//! | [`affine`] | 2D affine transform composition |
//! | [`ops`] | Segment projection, polygons, snapping primitives, angles |

pub mod affine;
pub mod bbox;
pub mod ops;
pub mod point;

pub use affine::Affine2;
pub use bbox::BBox;
pub use ops::{
    distance, distance_to_segment, midpoint, nearest_within, normalize_degrees, polygon_area, polygon_contains,
    project_onto_segment, rotate_about, snap_to_step,
};
pub use point::Point;

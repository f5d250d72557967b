//! Hit-testing of edit elements in drawing space.
//!
//! Elements are tested topmost first (reverse insertion order) and the first
//! hit wins. The tolerance is in drawing units; the engine derives it from the
//! screen slop divided by the zoom so thin lines stay clickable at any scale.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use plan_geom::{BBox, Point, distance_to_segment};

use crate::consts::{TEXT_ADVANCE, TEXT_SIZE};
use crate::doc::{EditElement, EditShape, ElementId};

/// Topmost element under `point`, if any.
#[must_use]
pub fn hit_test(point: Point, elements: &[EditElement], tolerance: f64) -> Option<ElementId> {
    elements
        .iter()
        .rev()
        .find(|e| shape_hit(&e.shape, point, tolerance))
        .map(|e| e.id)
}

/// Whether `point` lies on or within `tolerance` of `shape`.
#[must_use]
pub fn shape_hit(shape: &EditShape, point: Point, tolerance: f64) -> bool {
    match shape {
        EditShape::Wall { start, end } | EditShape::Window { start, end } | EditShape::Dimension { start, end } => {
            distance_to_segment(point, *start, *end) <= tolerance
        }
        EditShape::Door { .. } => shape
            .bounds()
            .is_some_and(|b| b.expand(tolerance).contains(point)),
        EditShape::Text { position, text } => text_box(*position, text).expand(tolerance).contains(point),
    }
}

/// Approximate extent of a text label anchored at its baseline start.
#[must_use]
pub fn text_box(position: Point, text: &str) -> BBox {
    #[allow(clippy::cast_precision_loss)]
    let chars = text.chars().count().max(1) as f64;
    let width = chars * TEXT_ADVANCE * TEXT_SIZE;
    BBox::new(Point::new(position.x, position.y - TEXT_SIZE), Point::new(position.x + width, position.y))
}

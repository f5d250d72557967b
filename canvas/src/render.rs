//! Scene building: turns edit elements into retained-mode drawable primitives.
//!
//! This module never touches a rendering backend. It receives read-only views
//! of the element collection, the selection, and the in-progress preview, and
//! produces a [`Scene`] in drawing space. Renderer adapters in
//! [`crate::renderer`] (and `crate::web` behind the `web` feature) consume it.
//!
//! Stroke widths are in screen pixels so lines keep a constant weight at any
//! zoom; adapters divide by the zoom when drawing in drawing space.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use plan_geom::{Point, midpoint, normalize_degrees};
use serde::Serialize;

use crate::consts::{DIMENSION_TICK, TEXT_SIZE, WINDOW_GAP};
use crate::doc::{EditElement, EditShape, ElementId, length_label};

/// Selection highlight color.
pub const SELECTED_COLOR: &str = "#1E90FF";

/// Stroke appearance of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub color: &'static str,
    pub width_px: f64,
    pub dashed: bool,
}

/// Geometry of a primitive, in drawing space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrimitiveShape {
    Line { a: Point, b: Point },
    /// Circular arc from `start_deg` sweeping `sweep_deg` (positive = toward +y).
    Arc { center: Point, radius: f64, start_deg: f64, sweep_deg: f64 },
    Text { position: Point, text: String, size: f64 },
}

/// One drawable item. `element` is `None` for the live preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    pub element: Option<ElementId>,
    pub style: StrokeStyle,
    pub shape: PrimitiveShape,
}

/// The full user-annotation layer for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitives belonging to `id`.
    pub fn for_element(&self, id: ElementId) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(move |p| p.element == Some(id))
    }

    /// Primitives of the live preview.
    pub fn preview(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| p.element.is_none())
    }
}

/// Build the annotation layer: elements bottom first, then the preview on top.
#[must_use]
pub fn build_scene(elements: &[EditElement], selected: Option<ElementId>, preview: Option<&EditShape>) -> Scene {
    let mut scene = Scene::default();
    for element in elements {
        let style = if selected == Some(element.id) {
            selected_style(&element.shape)
        } else {
            default_style(&element.shape)
        };
        push_shape(&mut scene.primitives, Some(element.id), style, &element.shape);
    }
    if let Some(shape) = preview {
        let style = StrokeStyle { dashed: true, ..default_style(shape) };
        push_shape(&mut scene.primitives, None, style, shape);
    }
    scene
}

/// Type-specific default stroke.
#[must_use]
pub fn default_style(shape: &EditShape) -> StrokeStyle {
    let (color, width_px) = match shape {
        EditShape::Wall { .. } => ("#1f2933", 3.0),
        EditShape::Window { .. } => ("#0f7fb3", 1.5),
        EditShape::Door { .. } => ("#9a5b13", 1.5),
        EditShape::Dimension { .. } => ("#5b6470", 1.0),
        EditShape::Text { .. } => ("#111827", 1.0),
    };
    StrokeStyle { color, width_px, dashed: false }
}

/// Highlight stroke for the selected element.
#[must_use]
pub fn selected_style(shape: &EditShape) -> StrokeStyle {
    let base = default_style(shape);
    StrokeStyle { color: SELECTED_COLOR, width_px: base.width_px + 1.0, dashed: false }
}

fn push_shape(out: &mut Vec<Primitive>, element: Option<ElementId>, style: StrokeStyle, shape: &EditShape) {
    let mut push = |shape: PrimitiveShape| out.push(Primitive { element, style, shape });
    match shape {
        EditShape::Wall { start, end } => push(PrimitiveShape::Line { a: *start, b: *end }),
        EditShape::Window { start, end } => match (*end - *start).normalized() {
            Some(dir) => {
                let offset = dir.perpendicular() * (WINDOW_GAP / 2.0);
                push(PrimitiveShape::Line { a: *start + offset, b: *end + offset });
                push(PrimitiveShape::Line { a: *start - offset, b: *end - offset });
            }
            None => push(PrimitiveShape::Line { a: *start, b: *end }),
        },
        EditShape::Door { position, width, orientation } => {
            let open = orientation.open_dir();
            let closed = orientation.closed_dir();
            push(PrimitiveShape::Line { a: *position, b: *position + open * *width });
            let start_deg = angle_deg(closed);
            push(PrimitiveShape::Arc {
                center: *position,
                radius: *width,
                start_deg,
                sweep_deg: signed_sweep(start_deg, angle_deg(open)),
            });
        }
        EditShape::Dimension { start, end } => {
            push(PrimitiveShape::Line { a: *start, b: *end });
            let label = length_label(plan_geom::distance(*start, *end));
            let label_at = match (*end - *start).normalized() {
                Some(dir) => {
                    let tick = dir.perpendicular() * DIMENSION_TICK;
                    push(PrimitiveShape::Line { a: *start - tick, b: *start + tick });
                    push(PrimitiveShape::Line { a: *end - tick, b: *end + tick });
                    midpoint(*start, *end) + tick * 1.5
                }
                None => *start,
            };
            push(PrimitiveShape::Text { position: label_at, text: label, size: TEXT_SIZE });
        }
        EditShape::Text { position, text } => {
            push(PrimitiveShape::Text { position: *position, text: text.clone(), size: TEXT_SIZE });
        }
    }
}

fn angle_deg(v: Point) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Shortest signed sweep from `from` to `to`, in `(-180, 180]`.
fn signed_sweep(from: f64, to: f64) -> f64 {
    let delta = normalize_degrees(to - from);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

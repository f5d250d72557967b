//! Annotation document: user-authored edit elements and their ordered store.
//!
//! `EditElement` is the unit of selection, drag, erase, persistence and undo.
//! Each variant of [`EditShape`] carries only its own fields. The store keeps
//! insertion order, which is also draw order: later elements sit on top.
//!
//! The serialized form is the persistence wire shape:
//! `{"id": "...", "type": "wall", "start": {...}, "end": {...}}`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use plan_geom::{BBox, Point, distance};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DOOR_MAX_WIDTH, DOOR_MIN_WIDTH};

/// Unique identifier for an edit element. Generated once, stable across edits.
pub type ElementId = Uuid;

/// Cardinal direction a door leaf swings open toward (screen-down is south).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorOrientation {
    N,
    S,
    E,
    W,
}

impl DoorOrientation {
    /// Infer the orientation from a draw gesture's displacement: the dominant
    /// axis and its sign pick the direction. Ties go to the horizontal axis.
    #[must_use]
    pub fn from_drag(delta: Point) -> Self {
        if delta.x.abs() >= delta.y.abs() {
            if delta.x >= 0.0 { Self::E } else { Self::W }
        } else if delta.y > 0.0 {
            Self::S
        } else {
            Self::N
        }
    }

    /// Unit vector of the open leaf.
    #[must_use]
    pub fn open_dir(self) -> Point {
        match self {
            Self::N => Point::new(0.0, -1.0),
            Self::S => Point::new(0.0, 1.0),
            Self::E => Point::new(1.0, 0.0),
            Self::W => Point::new(-1.0, 0.0),
        }
    }

    /// Unit vector of the closed leaf, lying along the wall opening.
    #[must_use]
    pub fn closed_dir(self) -> Point {
        match self {
            Self::N | Self::S => Point::new(1.0, 0.0),
            Self::E | Self::W => Point::new(0.0, 1.0),
        }
    }
}

/// Clamp a requested door width into the allowed leaf range.
#[must_use]
pub fn clamp_door_width(width: f64) -> f64 {
    if width.is_nan() {
        return DOOR_MIN_WIDTH;
    }
    width.clamp(DOOR_MIN_WIDTH, DOOR_MAX_WIDTH)
}

/// Geometry of an edit element, one variant per annotation type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EditShape {
    Wall { start: Point, end: Point },
    Window { start: Point, end: Point },
    Door { position: Point, width: f64, orientation: DoorOrientation },
    Dimension { start: Point, end: Point },
    Text { position: Point, text: String },
}

impl EditShape {
    /// Lower-case type name, matching the serialized `type` tag.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Wall { .. } => "wall",
            Self::Window { .. } => "window",
            Self::Door { .. } => "door",
            Self::Dimension { .. } => "dimension",
            Self::Text { .. } => "text",
        }
    }

    /// Points other edits snap to.
    #[must_use]
    pub fn anchors(&self) -> Vec<Point> {
        match self {
            Self::Wall { start, end } | Self::Window { start, end } | Self::Dimension { start, end } => {
                vec![*start, *end]
            }
            Self::Door { position, width, orientation } => {
                vec![*position, *position + orientation.open_dir() * *width]
            }
            Self::Text { position, .. } => vec![*position],
        }
    }

    /// The same shape moved by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Point) -> Self {
        match self {
            Self::Wall { start, end } => Self::Wall { start: *start + delta, end: *end + delta },
            Self::Window { start, end } => Self::Window { start: *start + delta, end: *end + delta },
            Self::Dimension { start, end } => Self::Dimension { start: *start + delta, end: *end + delta },
            Self::Door { position, width, orientation } => {
                Self::Door { position: *position + delta, width: *width, orientation: *orientation }
            }
            Self::Text { position, text } => Self::Text { position: *position + delta, text: text.clone() },
        }
    }

    /// Segment endpoints for the two-point variants.
    #[must_use]
    pub fn segment(&self) -> Option<(Point, Point)> {
        match self {
            Self::Wall { start, end } | Self::Window { start, end } | Self::Dimension { start, end } => {
                Some((*start, *end))
            }
            Self::Door { .. } | Self::Text { .. } => None,
        }
    }

    /// Length of a two-point variant.
    #[must_use]
    pub fn length(&self) -> Option<f64> {
        self.segment().map(|(a, b)| distance(a, b))
    }

    /// Axis-aligned extent, including the door swing quadrant.
    #[must_use]
    pub fn bounds(&self) -> Option<BBox> {
        match self {
            Self::Door { position, width, orientation } => BBox::from_points(&[
                *position,
                *position + orientation.open_dir() * *width,
                *position + orientation.closed_dir() * *width,
            ]),
            _ => BBox::from_points(&self.anchors()),
        }
    }
}

/// Length label for dimensions, in meters with two decimals.
#[must_use]
pub fn length_label(length: f64) -> String {
    format!("{length:.2} m")
}

/// A user-authored annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditElement {
    pub id: ElementId,
    #[serde(flatten)]
    pub shape: EditShape,
}

impl EditElement {
    /// Wrap a shape with a fresh identifier.
    #[must_use]
    pub fn new(shape: EditShape) -> Self {
        Self { id: Uuid::new_v4(), shape }
    }
}

/// Ordered in-memory store of edit elements.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    elements: Vec<EditElement>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Append an element on top of the draw order.
    pub fn push(&mut self, element: EditElement) {
        self.elements.push(element);
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<EditElement> {
        let index = self.elements.iter().position(|e| e.id == *id)?;
        Some(self.elements.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&EditElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Replace the geometry of an existing element. Returns false if it doesn't exist.
    pub fn set_shape(&mut self, id: &ElementId, shape: EditShape) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id == *id) else {
            return false;
        };
        element.shape = shape;
        true
    }

    /// Replace all elements with a full snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<EditElement>) {
        self.elements = elements;
    }

    /// All elements in draw order (bottom first).
    #[must_use]
    pub fn elements(&self) -> &[EditElement] {
        &self.elements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

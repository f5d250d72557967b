//! Normalized drawing model produced by the parser.
//!
//! A [`Drawing`] is immutable once parsed: re-fetching the source document
//! replaces it wholesale. All coordinates are origin-normalized drawing space
//! (the view-box offset has already been subtracted).

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use plan_geom::{BBox, Point};
use serde::{Deserialize, Serialize};

use crate::error::SkippedElement;

/// Discipline layer an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    Architectural,
    Structural,
    MepHvac,
    MepElectrical,
    MepPlumbing,
    Grid,
    Dimensions,
    Annotations,
    Furniture,
}

impl Layer {
    /// Parse an explicit layer tag, accepting the short aliases the generator emits.
    #[must_use]
    pub fn from_tag(raw: &str) -> Option<Self> {
        let layer = match raw.trim().to_ascii_lowercase().as_str() {
            "architectural" | "arch" | "architecture" => Self::Architectural,
            "structural" | "struct" | "structure" => Self::Structural,
            "mep-hvac" | "hvac" | "mechanical" => Self::MepHvac,
            "mep-electrical" | "electrical" => Self::MepElectrical,
            "mep-plumbing" | "plumbing" => Self::MepPlumbing,
            "grid" | "axes" | "axis" => Self::Grid,
            "dimensions" | "dims" | "dimension" => Self::Dimensions,
            "annotations" | "annotation" | "legend" => Self::Annotations,
            "furniture" | "interior" => Self::Furniture,
            _ => return None,
        };
        Some(layer)
    }

    /// Whether the layer is one of the MEP subsystems.
    #[must_use]
    pub fn is_mep(self) -> bool {
        matches!(self, Self::MepHvac | Self::MepElectrical | Self::MepPlumbing)
    }
}

/// Semantic type of a drawing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Wall,
    Door,
    Window,
    Column,
    Beam,
    Space,
    Core,
    Stairs,
    Elevator,
    Duct,
    Pipe,
    GridLine,
    Dimension,
    Text,
    Other,
}

impl ElementKind {
    /// Parse an explicit type tag.
    #[must_use]
    pub fn from_tag(raw: &str) -> Option<Self> {
        let kind = match raw.trim().to_ascii_lowercase().as_str() {
            "wall" => Self::Wall,
            "door" => Self::Door,
            "window" => Self::Window,
            "column" => Self::Column,
            "beam" => Self::Beam,
            "space" | "room" => Self::Space,
            "core" => Self::Core,
            "stairs" | "stair" => Self::Stairs,
            "elevator" | "lift" => Self::Elevator,
            "duct" => Self::Duct,
            "pipe" => Self::Pipe,
            "grid-line" | "gridline" | "grid" => Self::GridLine,
            "dimension" | "dim" => Self::Dimension,
            "text" | "label" => Self::Text,
            "other" => Self::Other,
            _ => return None,
        };
        Some(kind)
    }
}

/// Stroke and fill styling carried over from the source markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// Type-specific fields. Only the variant matching the element carries data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "detail", rename_all = "kebab-case")]
pub enum ElementDetail {
    Circle {
        radius: f64,
    },
    Space {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        area: f64,
        daylight: bool,
    },
    Text {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
    },
}

/// How a renderer should draw an element, derived from its points and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderShape {
    Marker,
    Segment,
    LabeledRect,
    Polyline,
    Polygon,
}

/// A normalized unit of the base drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingElement {
    /// Unique within one parsed drawing.
    pub id: String,
    pub kind: ElementKind,
    pub layer: Layer,
    /// At least one point, in drawing space.
    pub points: Vec<Point>,
    /// Axis-aligned extent of `points`.
    pub bbox: Option<BBox>,
    /// Whether the outline closes back to the first point.
    pub closed: bool,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ElementDetail>,
}

impl DrawingElement {
    /// Build an element, deriving `bbox` from `points`.
    #[must_use]
    pub fn new(id: String, kind: ElementKind, layer: Layer, points: Vec<Point>, closed: bool) -> Self {
        let bbox = BBox::from_points(&points);
        Self { id, kind, layer, points, bbox, closed, style: Style::default(), detail: None }
    }

    #[must_use]
    pub fn render_shape(&self) -> RenderShape {
        match self.points.len() {
            0 | 1 => RenderShape::Marker,
            2 => RenderShape::Segment,
            4 if self.kind == ElementKind::Space => RenderShape::LabeledRect,
            _ if self.closed => RenderShape::Polygon,
            _ => RenderShape::Polyline,
        }
    }

    /// Subtract `offset` from every point and refresh the bounding box.
    pub(crate) fn shift(&mut self, offset: Point) {
        for p in &mut self.points {
            *p = *p - offset;
        }
        self.bbox = BBox::from_points(&self.points);
    }
}

/// The source document's `viewBox`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// One structural grid axis with its generated label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridAxis {
    pub position: f64,
    pub label: String,
}

/// A parsed base drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<ViewBox>,
    pub elements: Vec<DrawingElement>,
    /// Sorted, deduplicated X grid positions.
    pub grid_x: Vec<f64>,
    /// Sorted, deduplicated Y grid positions.
    pub grid_y: Vec<f64>,
    /// Elements dropped as malformed.
    pub skipped: Vec<SkippedElement>,
}

impl Drawing {
    /// Drawing extent in drawing space, anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> BBox {
        BBox::new(Point::new(0.0, 0.0), Point::new(self.width, self.height))
    }

    /// X axes labelled `A, B, …` in position order.
    #[must_use]
    pub fn axes_x(&self) -> Vec<GridAxis> {
        self.grid_x
            .iter()
            .enumerate()
            .map(|(i, &position)| GridAxis { position, label: crate::grid::letter_label(i) })
            .collect()
    }

    /// Y axes labelled `1, 2, …` in position order.
    #[must_use]
    pub fn axes_y(&self) -> Vec<GridAxis> {
        self.grid_y
            .iter()
            .enumerate()
            .map(|(i, &position)| GridAxis { position, label: (i + 1).to_string() })
            .collect()
    }

    /// Elements on `layer`, in document order.
    pub fn elements_on(&self, layer: Layer) -> impl Iterator<Item = &DrawingElement> {
        self.elements.iter().filter(move |e| e.layer == layer)
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&DrawingElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}

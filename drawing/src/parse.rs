//! Document walker: turns the parsed markup tree into a [`Drawing`].
//!
//! DESIGN
//! ======
//! The document is parsed with `roxmltree` and walked recursively from the
//! first `<svg>` element. Group tags contribute layer markers to their
//! descendants; shape tags become elements; `<text>` elements take the
//! character data of all their descendants (including `<tspan>` children).
//! Non-rendered subtrees (`defs`, `style`, `title`, ...) are skipped wholesale.
//!
//! ERROR HANDLING
//! ==============
//! Only document-level problems fail the parse: markup that is not
//! well-formed, or no `<svg>` element at all. A bad element is recorded in
//! [`Drawing::skipped`], logged at `debug`, and the walk continues.

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

use std::collections::{HashMap, HashSet};

use plan_geom::{BBox, Point};
use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, info};

use crate::error::{ParseError, SkipReason, SkippedElement};
use crate::grid;
use crate::model::{Drawing, DrawingElement, ElementDetail, ElementKind, Layer, Style, ViewBox};
use crate::palette::InferenceTables;
use crate::shapes::{self, Geometry, ShapeExtra};

/// Subtrees that never contain drawable elements.
const SKIPPED_SUBTREES: &[&str] = &[
    "defs", "style", "title", "desc", "metadata", "script", "clipPath", "mask", "marker", "symbol", "pattern",
];

/// Vector-drawing parser configured with a set of inference tables.
#[derive(Debug, Clone, Default)]
pub struct DrawingParser {
    tables: InferenceTables,
}

impl DrawingParser {
    #[must_use]
    pub fn new(tables: InferenceTables) -> Self {
        Self { tables }
    }

    #[must_use]
    pub fn tables(&self) -> &InferenceTables {
        &self.tables
    }

    /// Parse raw markup into a normalized drawing.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the markup is not well-formed or has no
    /// `<svg>` element.
    pub fn parse(&self, text: &str) -> Result<Drawing, ParseError> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let document = Document::parse_with_options(text, options)?;
        let root = document
            .descendants()
            .find(|node| node.is_element() && node.tag_name().name() == "svg")
            .ok_or(ParseError::MissingRoot)?;

        let mut walker = Walker::new(&self.tables);
        walker.visit_children(root, container_marker(root, &self.tables));

        let drawing = finish(root, walker.elements, walker.skipped);
        info!(
            elements = drawing.elements.len(),
            skipped = drawing.skipped.len(),
            grid_x = drawing.grid_x.len(),
            grid_y = drawing.grid_y.len(),
            "parsed drawing"
        );
        Ok(drawing)
    }
}

/// Parse with the default generator tables.
///
/// # Errors
///
/// See [`DrawingParser::parse`].
pub fn parse_drawing(text: &str) -> Result<Drawing, ParseError> {
    DrawingParser::default().parse(text)
}

// =============================================================================
// WALKER
// =============================================================================

/// Layer marker contributed by a group to its descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Layer(Layer),
    /// Generic MEP group: subsystem comes from the element's color.
    Mep,
}

/// Marker set on a container by `data-layer` or a layer class.
fn container_marker(node: Node<'_, '_>, tables: &InferenceTables) -> Option<Marker> {
    if let Some(layer) = node.attribute("data-layer").and_then(Layer::from_tag) {
        return Some(Marker::Layer(layer));
    }
    node.attribute("class")?
        .split_ascii_whitespace()
        .find_map(|class| tables.marker(class))
        .map(|layer| layer.map_or(Marker::Mep, Marker::Layer))
}

struct Walker<'t> {
    tables: &'t InferenceTables,
    elements: Vec<DrawingElement>,
    skipped: Vec<SkippedElement>,
    ids: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl<'t> Walker<'t> {
    fn new(tables: &'t InferenceTables) -> Self {
        Self {
            tables,
            elements: Vec::new(),
            skipped: Vec::new(),
            ids: HashSet::new(),
            counters: HashMap::new(),
        }
    }

    /// Visit the element children of `parent` in document order.
    fn visit_children(&mut self, parent: Node<'_, '_>, inherited: Option<Marker>) {
        for child in parent.children().filter(Node::is_element) {
            let name = child.tag_name().name();
            if SKIPPED_SUBTREES.contains(&name) {
                continue;
            }
            if name == "text" {
                self.text(child, inherited);
                continue;
            }
            if let Some(geometry) = shapes::read_geometry(child) {
                match geometry {
                    Ok(geometry) => self.push_shape(child, geometry, inherited),
                    Err(reason) => self.skip(child, reason),
                }
                continue;
            }
            let marker = container_marker(child, self.tables).or(inherited);
            self.visit_children(child, marker);
        }
    }

    fn text(&mut self, node: Node<'_, '_>, inherited: Option<Marker>) {
        let (anchor, font_size) = match shapes::read_text_anchor(node) {
            Ok(anchor) => anchor,
            Err(reason) => {
                self.skip(node, reason);
                return;
            }
        };
        let content = node
            .descendants()
            .filter(|n| n.is_text() && !n.ancestors().any(|a| SKIPPED_SUBTREES.contains(&a.tag_name().name())))
            .filter_map(|n| n.text())
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let geometry = Geometry { points: vec![anchor], closed: false, extra: ShapeExtra::None };
        let mut element = self.build(node, geometry, inherited);
        if content.is_empty() {
            self.record_skip("text", Some(element.id), SkipReason::EmptyText);
            return;
        }
        element.detail = Some(ElementDetail::Text { content, font_size });
        self.elements.push(element);
    }

    fn push_shape(&mut self, node: Node<'_, '_>, geometry: Geometry, inherited: Option<Marker>) {
        let extra = geometry.extra;
        let mut element = self.build(node, geometry, inherited);
        element.detail = match extra {
            ShapeExtra::Circle { radius } => Some(ElementDetail::Circle { radius }),
            ShapeExtra::Rect { width, height } if matches!(element.kind, ElementKind::Space | ElementKind::Core) => {
                Some(ElementDetail::Space {
                    name: node
                        .attribute("data-name")
                        .or_else(|| node.attribute("name"))
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_owned),
                    area: width * height,
                    daylight: node.attribute("data-daylight").is_some_and(is_truthy),
                })
            }
            _ => None,
        };
        self.elements.push(element);
    }

    /// Assign id, layer, kind and style for a node with known geometry.
    fn build(&mut self, node: Node<'_, '_>, geometry: Geometry, inherited: Option<Marker>) -> DrawingElement {
        let style = shapes::read_style(node);
        let layer = self.infer_layer(node, &style, inherited);
        let kind = self.infer_kind(node, layer, geometry.points.len());
        let id = self.unique_id(node);
        let mut element = DrawingElement::new(id, kind, layer, geometry.points, geometry.closed);
        element.style = style;
        element
    }

    fn unique_id(&mut self, node: Node<'_, '_>) -> String {
        let base = match node.attribute("id").map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_owned(),
            None => {
                let tag = node.tag_name().name();
                let counter = self.counters.entry(tag.to_owned()).or_insert(0);
                *counter += 1;
                format!("{tag}-{counter}")
            }
        };
        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.ids.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.ids.insert(candidate.clone());
        candidate
    }

    fn infer_layer(&self, node: Node<'_, '_>, style: &Style, inherited: Option<Marker>) -> Layer {
        if let Some(layer) = node.attribute("data-layer").and_then(Layer::from_tag) {
            return layer;
        }
        let colors = || [style.stroke.as_deref(), style.fill.as_deref()].into_iter().flatten();
        match inherited {
            Some(Marker::Layer(layer)) => return layer,
            Some(Marker::Mep) => {
                return colors()
                    .find_map(|c| self.tables.mep_layer_for_color(c))
                    .unwrap_or(Layer::MepHvac);
            }
            None => {}
        }
        if let Some(layer) = node.attribute("class").and_then(|class| self.tables.layer_for_class(class)) {
            return layer;
        }
        colors()
            .find_map(|c| self.tables.layer_for_color(c))
            .unwrap_or(Layer::Architectural)
    }

    fn infer_kind(&self, node: Node<'_, '_>, layer: Layer, point_count: usize) -> ElementKind {
        if let Some(kind) = node.attribute("data-type").and_then(ElementKind::from_tag) {
            return kind;
        }
        let tag = node.tag_name().name();
        let is_text = tag == "text";
        for haystack in [node.attribute("class"), node.attribute("id")].into_iter().flatten() {
            let keyword = self.tables.kind_for_keywords(haystack);
            if let Some(kind) = keyword.filter(|k| !is_text || is_text_compatible(*k)) {
                return kind;
            }
        }
        if !is_text && point_count == 2 {
            match layer {
                Layer::Grid => return ElementKind::GridLine,
                Layer::Dimensions => return ElementKind::Dimension,
                _ => {}
            }
        }
        match tag {
            "text" => ElementKind::Text,
            "rect" => ElementKind::Space,
            "line" | "polyline" | "path" => ElementKind::Wall,
            _ => ElementKind::Other,
        }
    }

    fn skip(&mut self, node: Node<'_, '_>, reason: SkipReason) {
        let id = node.attribute("id").map(str::to_owned);
        self.record_skip(node.tag_name().name(), id, reason);
    }

    fn record_skip(&mut self, tag: &str, id: Option<String>, reason: SkipReason) {
        debug!(tag, id = id.as_deref().unwrap_or(""), %reason, "skipped drawing element");
        self.skipped.push(SkippedElement { tag: tag.to_owned(), id, reason });
    }
}

/// Kinds a `<text>` node may take from its class or id.
fn is_text_compatible(kind: ElementKind) -> bool {
    matches!(kind, ElementKind::Text | ElementKind::Dimension | ElementKind::GridLine)
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

// =============================================================================
// DOCUMENT FRAME
// =============================================================================

/// Normalize coordinates and derive bounds and grid from the root attributes.
fn finish(root: Node<'_, '_>, mut elements: Vec<DrawingElement>, skipped: Vec<SkippedElement>) -> Drawing {
    let view_box = root.attribute("viewBox").and_then(parse_view_box);
    let offset = view_box.map_or(Point::default(), |vb| Point::new(vb.min_x, vb.min_y));
    if offset != Point::default() {
        for element in &mut elements {
            element.shift(offset);
        }
    }

    let explicit_x = root.attribute("data-grid-x").map(grid::parse_coordinate_list).unwrap_or_default();
    let explicit_y = root.attribute("data-grid-y").map(grid::parse_coordinate_list).unwrap_or_default();
    let (inferred_x, inferred_y) = if explicit_x.is_empty() || explicit_y.is_empty() {
        grid::infer_from_elements(&elements)
    } else {
        (Vec::new(), Vec::new())
    };
    let grid_x = if explicit_x.is_empty() {
        inferred_x
    } else {
        grid::sorted_unique(explicit_x.into_iter().map(|x| x - offset.x).collect())
    };
    let grid_y = if explicit_y.is_empty() {
        inferred_y
    } else {
        grid::sorted_unique(explicit_y.into_iter().map(|y| y - offset.y).collect())
    };

    let (width, height) = match view_box {
        Some(vb) => (vb.width, vb.height),
        None => {
            let extent = elements.iter().filter_map(|e| e.bbox).reduce(|a, b| a.union(&b));
            (
                root_dimension(root, "width").unwrap_or_else(|| extent.map_or(0.0, |b: BBox| b.max_x.max(0.0))),
                root_dimension(root, "height").unwrap_or_else(|| extent.map_or(0.0, |b: BBox| b.max_y.max(0.0))),
            )
        }
    };

    Drawing { width, height, view_box, elements, grid_x, grid_y, skipped }
}

fn parse_view_box(raw: &str) -> Option<ViewBox> {
    let values = grid::parse_coordinate_list(raw);
    let [min_x, min_y, width, height] = values.as_slice() else {
        return None;
    };
    (*width > 0.0 && *height > 0.0).then_some(ViewBox { min_x: *min_x, min_y: *min_y, width: *width, height: *height })
}

fn root_dimension(root: Node<'_, '_>, attr: &str) -> Option<f64> {
    match root.attribute(attr).map(|raw| shapes::parse_number(raw, attr)) {
        Some(Ok(v)) if v > 0.0 => Some(v),
        _ => None,
    }
}

//! Drawing summary printed by `planview inspect`.

#[cfg(test)]
#[path = "summary_test.rs"]
mod summary_test;

use std::collections::BTreeMap;

use plan_drawing::{Drawing, ElementKind, GridAxis, Layer, SkippedElement};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DrawingSummary {
    pub width: f64,
    pub height: f64,
    pub elements: usize,
    pub by_layer: BTreeMap<Layer, usize>,
    pub by_kind: BTreeMap<ElementKind, usize>,
    pub axes_x: Vec<GridAxis>,
    pub axes_y: Vec<GridAxis>,
    pub skipped: Vec<SkippedElement>,
}

impl DrawingSummary {
    pub fn from_drawing(drawing: &Drawing) -> Self {
        let mut by_layer = BTreeMap::new();
        let mut by_kind = BTreeMap::new();
        for element in &drawing.elements {
            *by_layer.entry(element.layer).or_insert(0) += 1;
            *by_kind.entry(element.kind).or_insert(0) += 1;
        }
        Self {
            width: drawing.width,
            height: drawing.height,
            elements: drawing.elements.len(),
            by_layer,
            by_kind,
            axes_x: drawing.axes_x(),
            axes_y: drawing.axes_y(),
            skipped: drawing.skipped.clone(),
        }
    }

    /// Plain-text report.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("size      {} x {}", self.width, self.height),
            format!("elements  {}", self.elements),
            "layers".to_owned(),
        ];
        lines.extend(self.by_layer.iter().map(|(layer, count)| format!("  {:<16}{count}", wire_name(layer))));
        lines.push("types".to_owned());
        lines.extend(self.by_kind.iter().map(|(kind, count)| format!("  {:<16}{count}", wire_name(kind))));
        lines.push(format!("grid x    {}", axes(&self.axes_x)));
        lines.push(format!("grid y    {}", axes(&self.axes_y)));
        lines.push(format!("skipped   {}", self.skipped.len()));
        lines.extend(self.skipped.iter().map(|s| {
            format!("  <{}> {}: {}", s.tag, s.id.as_deref().unwrap_or("-"), s.reason)
        }));
        lines.join("\n")
    }
}

fn axes(axes: &[GridAxis]) -> String {
    if axes.is_empty() {
        return "-".to_owned();
    }
    axes.iter().map(|a| format!("{}@{}", a.label, a.position)).collect::<Vec<_>>().join(" ")
}

/// The serde name of a unit enum variant (`mep-hvac`, `grid-line`).
fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::from("?"),
    }
}

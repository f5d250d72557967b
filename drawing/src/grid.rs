//! Structural grid extraction and axis labelling.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use svgtypes::NumberListParser;

use crate::model::{DrawingElement, ElementKind, Layer};

/// Positions closer than this are the same axis.
const DEDUP_TOLERANCE: f64 = 1e-3;

/// A line is axis-aligned when its off-axis span is below this fraction of its length.
const AXIS_ALIGN_RATIO: f64 = 0.02;

/// Spreadsheet-style column label: `0 → A`, `25 → Z`, `26 → AA`.
#[must_use]
pub fn letter_label(index: usize) -> String {
    const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut n = index + 1;
    let mut out = Vec::new();
    while n > 0 {
        out.push(char::from(LETTERS[(n - 1) % 26]));
        n = (n - 1) / 26;
    }
    out.iter().rev().collect()
}

/// Parse a serialized coordinate list (`"0,7.5,15"` or `"0 7.5 15"`).
/// Reading stops at the first entry that is not a finite number.
pub(crate) fn parse_coordinate_list(raw: &str) -> Vec<f64> {
    NumberListParser::from(raw)
        .map_while(Result::ok)
        .take_while(|v| v.is_finite())
        .collect()
}

/// Infer X and Y grid positions from axis-styled straight lines.
pub(crate) fn infer_from_elements(elements: &[DrawingElement]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for element in elements {
        if element.kind != ElementKind::GridLine && element.layer != Layer::Grid {
            continue;
        }
        let [a, b] = element.points.as_slice() else {
            continue;
        };
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        let length = dx.hypot(dy);
        if length == 0.0 {
            continue;
        }
        if dx <= length * AXIS_ALIGN_RATIO {
            xs.push(f64::midpoint(a.x, b.x));
        } else if dy <= length * AXIS_ALIGN_RATIO {
            ys.push(f64::midpoint(a.y, b.y));
        }
    }
    (sorted_unique(xs), sorted_unique(ys))
}

/// Sort ascending and merge positions within [`DEDUP_TOLERANCE`].
pub(crate) fn sorted_unique(mut values: Vec<f64>) -> Vec<f64> {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);
    values.dedup_by(|later, kept| (*later - *kept).abs() < DEDUP_TOLERANCE);
    values
}

//! Vector-drawing parser for generated floor plans.
//!
//! Reads the SVG markup produced by the design generator and returns a
//! [`Drawing`]: typed elements with an inferred discipline layer, the
//! structural grid, and the document bounds, all in origin-normalized
//! drawing space.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`model`] | `Drawing`, `DrawingElement`, layers and kinds |
//! | [`palette`] | Color / class / keyword inference tables |
//! | [`error`] | `ParseError` and per-element `SkipReason` |
//! | `shapes` | Per-tag geometry readers |
//! | `path` | Path-data reader |
//! | `grid` | Grid extraction and axis labels |
//! | `parse` | Document walker over the `roxmltree` tree |

pub mod error;
mod grid;
pub mod model;
pub mod palette;
mod parse;
mod path;
mod shapes;

pub use error::{ParseError, SkipReason, SkippedElement};
pub use grid::letter_label;
pub use model::{Drawing, DrawingElement, ElementDetail, ElementKind, GridAxis, Layer, RenderShape, Style, ViewBox};
pub use palette::InferenceTables;
pub use parse::{DrawingParser, parse_drawing};

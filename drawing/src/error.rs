//! Parse failures: fatal document errors and per-element skip reasons.

use serde::Serialize;

/// The drawing as a whole could not be read. Nothing is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No `<svg>` element was found.
    #[error("drawing has no root <svg> element")]
    MissingRoot,
    /// The markup is not well-formed: an unclosed root, a tag or comment cut
    /// off, a stray closing tag, an unknown entity.
    #[error("malformed markup at {line}:{column}: {message}")]
    Malformed { line: u32, column: u32, message: String },
}

impl From<roxmltree::Error> for ParseError {
    fn from(error: roxmltree::Error) -> Self {
        if matches!(error, roxmltree::Error::NoRootNode) {
            return Self::MissingRoot;
        }
        let pos = error.pos();
        Self::Malformed { line: pos.row, column: pos.col, message: error.to_string() }
    }
}

/// Why a single drawing element was dropped. The parse continues.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    #[error("attribute `{attr}` is not a finite number")]
    InvalidNumber { attr: String },
    #[error("missing required attribute `{attr}`")]
    MissingAttribute { attr: String },
    #[error("rectangle has zero area")]
    ZeroArea,
    #[error("line has zero length")]
    ZeroLength,
    #[error("circle radius must be positive")]
    NonPositiveRadius,
    #[error("needs at least {needed} points, found {found}")]
    TooFewPoints { found: usize, needed: usize },
    #[error("point list has an odd number of coordinates")]
    OddCoordinates,
    #[error("text element has no content")]
    EmptyText,
    #[error("path data: {detail}")]
    PathData { detail: String },
}

/// Record of one element dropped during parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedElement {
    /// Markup tag name (`rect`, `path`, ...).
    pub tag: String,
    /// The element's `id` attribute, when it had one.
    pub id: Option<String>,
    #[serde(flatten)]
    pub reason: SkipReason,
}

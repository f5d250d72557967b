//! Engine error type.

use crate::doc::ElementId;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("element {0} has no text")]
    NotText(ElementId),
}

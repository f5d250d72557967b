//! Model asset errors. Every variant ends in the placeholder massing box.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("model asset is empty")]
    Empty,
    #[error("model asset is neither binary nor JSON glTF")]
    UnrecognizedFormat,
    #[error("model asset JSON is invalid: {0}")]
    InvalidJson(String),
}

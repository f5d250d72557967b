//! Model asset sniffing.
//!
//! The viewer does not decode meshes itself; it hands the asset to the host's
//! 3D runtime. What it checks here is whether the bytes are a glTF asset at
//! all, so that anything else falls back to the placeholder box.

#[cfg(test)]
#[path = "asset_test.rs"]
mod asset_test;

use serde_json::Value;

use crate::error::AssetError;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFormat {
    /// Binary container (`.glb`).
    Binary,
    /// JSON document (`.gltf`).
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelAsset {
    pub format: AssetFormat,
    /// Container or `asset.version` value, when present.
    pub version: Option<String>,
    pub bytes: Vec<u8>,
}

impl ModelAsset {
    /// Classify raw bytes as binary or JSON glTF.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError`] for empty input, unknown formats, and JSON
    /// without an `asset` object.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::Empty);
        }
        if bytes.starts_with(GLB_MAGIC) {
            if bytes.len() < GLB_HEADER_LEN {
                return Err(AssetError::UnrecognizedFormat);
            }
            let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            return Ok(Self { format: AssetFormat::Binary, version: Some(version.to_string()), bytes });
        }
        let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
        if first != Some(&b'{') {
            return Err(AssetError::UnrecognizedFormat);
        }
        let doc: Value = serde_json::from_slice(&bytes).map_err(|e| AssetError::InvalidJson(e.to_string()))?;
        let Some(asset) = doc.get("asset").and_then(Value::as_object) else {
            return Err(AssetError::InvalidJson("missing `asset` object".to_owned()));
        };
        let version = asset.get("version").and_then(Value::as_str).map(str::to_owned);
        Ok(Self { format: AssetFormat::Json, version, bytes })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

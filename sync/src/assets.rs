//! Base drawing and 3D model fetches with stale-response protection.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::sync::Arc;

use plan_drawing::{Drawing, parse_drawing};
use tracing::info;

use crate::api::ApiClient;
use crate::error::SyncError;
use crate::guard::LatestRequest;

pub struct AssetLoader {
    api: Arc<ApiClient>,
    drawing: LatestRequest,
    model: LatestRequest,
}

impl AssetLoader {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api, drawing: LatestRequest::new(), model: LatestRequest::new() }
    }

    /// Fetch and parse the base drawing. `Ok(None)` means a newer drawing was requested meanwhile.
    ///
    /// # Errors
    ///
    /// Returns fetch failures and [`SyncError::Parse`] for a drawing without a valid root.
    pub async fn load_drawing(&self, url: &str) -> Result<Option<Drawing>, SyncError> {
        self.drawing.begin(url);
        let bytes = self.api.fetch_file(url).await?;
        if !self.drawing.is_current(url) {
            return Ok(None);
        }
        let drawing = parse_drawing(&String::from_utf8_lossy(&bytes))?;
        info!(url, elements = drawing.elements.len(), skipped = drawing.skipped.len(), "drawing loaded");
        Ok(Some(drawing))
    }

    /// Fetch the raw model asset. `Ok(None)` means a newer model was requested meanwhile.
    ///
    /// # Errors
    ///
    /// Returns fetch failures.
    pub async fn load_model(&self, url: &str) -> Result<Option<Vec<u8>>, SyncError> {
        self.model.begin(url);
        let bytes = self.api.fetch_file(url).await?;
        if !self.model.is_current(url) {
            return Ok(None);
        }
        info!(url, bytes = bytes.len(), "model fetched");
        Ok(Some(bytes))
    }
}

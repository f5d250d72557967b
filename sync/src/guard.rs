//! Stale-response guard for asset loads.
//!
//! Fetches for the base drawing and the 3D model are not cancelled when a
//! newer one starts. Instead each load records its URL here before awaiting,
//! and a response is applied only if its URL is still the latest requested.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::{Mutex, PoisonError};

use tracing::debug;

#[derive(Debug, Default)]
pub struct LatestRequest {
    latest: Mutex<Option<String>>,
}

impl LatestRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url` as the latest request.
    pub fn begin(&self, url: &str) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(url.to_owned());
    }

    /// Whether a response for `url` may still be applied.
    #[must_use]
    pub fn is_current(&self, url: &str) -> bool {
        let current = self.latest.lock().unwrap_or_else(PoisonError::into_inner).as_deref() == Some(url);
        if !current {
            debug!(url, "ignoring stale response");
        }
        current
    }

    #[must_use]
    pub fn latest(&self) -> Option<String> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

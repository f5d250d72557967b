//! Plan API client with candidate base resolution.
//!
//! DESIGN
//! ======
//! The API may live behind an explicit override, on the page's own origin, or
//! on a local development server. Each call walks the candidates in order and
//! the first base that answers with a 2xx is remembered; later calls try the
//! remembered base first and only walk the rest if it stops answering.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, Mutex, PoisonError};

use plan_canvas::EditElement;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::SyncError;
use crate::payload::PlanPayload;
use crate::transport::{HttpResponse, HttpTransport};

pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    candidates: Vec<String>,
    resolved: Mutex<Option<String>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, candidates: Vec<String>) -> Self {
        Self { transport, candidates, resolved: Mutex::new(None) }
    }

    #[must_use]
    pub fn transport(&self) -> Arc<dyn HttpTransport> {
        Arc::clone(&self.transport)
    }

    /// Base that last answered successfully, if any.
    #[must_use]
    pub fn resolved_base(&self) -> Option<String> {
        self.resolved.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Fetch the saved plan edits for a run.
    ///
    /// # Errors
    ///
    /// Returns the last candidate's failure, or a decode error for a bad body.
    pub async fn fetch_plan(&self, run_id: &str) -> Result<Vec<EditElement>, SyncError> {
        let response = self.send(&plan_path(run_id), None).await?;
        let payload: PlanPayload = serde_json::from_slice(&response.body)?;
        Ok(payload.into_elements())
    }

    /// Replace the saved plan edits for a run.
    ///
    /// # Errors
    ///
    /// Returns the last candidate's failure.
    pub async fn save_plan(&self, run_id: &str, elements: &[EditElement]) -> Result<(), SyncError> {
        let body = json!({ "payload": { "elements": elements } });
        self.send(&plan_path(run_id), Some(&body)).await?;
        Ok(())
    }

    /// Fetch an absolute file URL.
    ///
    /// # Errors
    ///
    /// Returns transport failures and non-2xx statuses.
    pub async fn fetch_file(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let response = self.transport.get(url).await?.require_success()?;
        Ok(response.body)
    }

    async fn send(&self, path: &str, body: Option<&Value>) -> Result<HttpResponse, SyncError> {
        let mut last = SyncError::NoBaseAvailable;
        for base in self.ordered_bases() {
            let url = format!("{base}{path}");
            let result = match body {
                Some(body) => self.transport.post_json(&url, body).await,
                None => self.transport.get(&url).await,
            };
            match result.and_then(HttpResponse::require_success) {
                Ok(response) => {
                    self.remember(&base);
                    return Ok(response);
                }
                Err(e) => {
                    debug!(%url, error = %e, "api candidate failed");
                    last = e;
                }
            }
        }
        Err(last)
    }

    fn ordered_bases(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.candidates.len() + 1);
        if let Some(resolved) = self.resolved_base() {
            out.push(resolved);
        }
        for base in &self.candidates {
            if !out.contains(base) {
                out.push(base.clone());
            }
        }
        out
    }

    fn remember(&self, base: &str) {
        let mut resolved = self.resolved.lock().unwrap_or_else(PoisonError::into_inner);
        if resolved.as_deref() != Some(base) {
            info!(base, "api base resolved");
            *resolved = Some(base.to_owned());
        }
    }
}

fn plan_path(run_id: &str) -> String {
    format!("/api/runs/{run_id}/plan")
}

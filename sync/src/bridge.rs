//! Persistence bridge: remote save/load with a local fallback.
//!
//! DESIGN
//! ======
//! `save` always leaves the collection somewhere. Without a run it goes to
//! the no-run key. With a run it is posted to the API, and any failure writes
//! the same payload under `planEdits:{runId}`.
//!
//! `load` runs once per run identifier. The remote copy wins; if the remote
//! read fails the local copy for that run is used, and if there is none the
//! editor starts empty.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures are logged at `warn` and reported as
//! [`SaveOutcome::LocalFallback`] or [`LoadSource::Local`]. A corrupt local
//! entry is logged and treated as absent. Only a failing local store is an
//! error, because at that point the edit has nowhere to go.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use std::sync::{Arc, Mutex, PoisonError};

use plan_canvas::EditElement;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::SyncError;
use crate::payload::{PlanPayload, local_key};
use crate::store::LocalStore;

/// Where a save ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Posted to the API.
    Remote,
    /// The API failed; written under the run's local key.
    LocalFallback,
    /// No run yet; written under the no-run key.
    LocalNoRun,
}

/// Where loaded elements came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Remote,
    Local,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub source: LoadSource,
    pub elements: Vec<EditElement>,
}

pub struct PersistenceBridge {
    api: Arc<ApiClient>,
    store: Arc<dyn LocalStore>,
    loaded_for: Mutex<Option<Option<String>>>,
}

impl PersistenceBridge {
    #[must_use]
    pub fn new(api: Arc<ApiClient>, store: Arc<dyn LocalStore>) -> Self {
        Self { api, store, loaded_for: Mutex::new(None) }
    }

    #[must_use]
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Save the whole collection.
    ///
    /// # Errors
    ///
    /// Returns an error only if the local store write fails.
    pub async fn save(&self, run_id: Option<&str>, elements: &[EditElement]) -> Result<SaveOutcome, SyncError> {
        let Some(run_id) = run_id else {
            self.write_local(None, elements)?;
            info!(count = elements.len(), "plan saved locally; no run yet");
            return Ok(SaveOutcome::LocalNoRun);
        };
        match self.api.save_plan(run_id, elements).await {
            Ok(()) => {
                info!(run_id, count = elements.len(), "plan saved");
                Ok(SaveOutcome::Remote)
            }
            Err(e) => {
                self.write_local(Some(run_id), elements)?;
                warn!(run_id, error = %e, "plan save failed; wrote local fallback");
                Ok(SaveOutcome::LocalFallback)
            }
        }
    }

    /// Load once per run identifier. Returns `None` when this run was already
    /// loaded. A failed load is not recorded, so the next call retries.
    ///
    /// # Errors
    ///
    /// Returns an error only if the local store cannot be read.
    pub async fn load(&self, run_id: Option<&str>) -> Result<Option<Loaded>, SyncError> {
        if self.is_loaded(run_id) {
            return Ok(None);
        }
        let loaded = self.load_now(run_id).await?;
        *self.loaded_for.lock().unwrap_or_else(PoisonError::into_inner) = Some(run_id.map(str::to_owned));
        Ok(Some(loaded))
    }

    /// Load unconditionally, bypassing the once-per-run check.
    ///
    /// # Errors
    ///
    /// Returns an error only if the local store cannot be read.
    pub async fn load_now(&self, run_id: Option<&str>) -> Result<Loaded, SyncError> {
        if let Some(run_id) = run_id {
            match self.api.fetch_plan(run_id).await {
                Ok(elements) => {
                    info!(run_id, count = elements.len(), "plan loaded");
                    return Ok(Loaded { source: LoadSource::Remote, elements });
                }
                Err(e) => warn!(run_id, error = %e, "plan load failed; reading local fallback"),
            }
        }
        Ok(match self.read_local(run_id)? {
            Some(elements) => Loaded { source: LoadSource::Local, elements },
            None => Loaded { source: LoadSource::Empty, elements: Vec::new() },
        })
    }

    /// Whether `load` already succeeded for `run_id`.
    #[must_use]
    pub fn is_loaded(&self, run_id: Option<&str>) -> bool {
        self.loaded_for
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|prev| prev.as_deref() == run_id)
    }

    /// Forget which run was loaded so the next `load` runs again.
    pub fn reset_loaded(&self) {
        *self.loaded_for.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn write_local(&self, run_id: Option<&str>, elements: &[EditElement]) -> Result<(), SyncError> {
        let json = serde_json::to_string(&serde_json::json!({ "payload": { "elements": elements } }))?;
        self.store.set(&local_key(run_id), &json)
    }

    fn read_local(&self, run_id: Option<&str>) -> Result<Option<Vec<EditElement>>, SyncError> {
        let key = local_key(run_id);
        let Some(text) = self.store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<PlanPayload>(&text) {
            Ok(payload) => Ok(Some(payload.into_elements())),
            Err(e) => {
                warn!(key = %key, error = %e, "local plan entry is corrupt; ignoring");
                Ok(None)
            }
        }
    }
}

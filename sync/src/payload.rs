//! Plan edit payload, shared by the remote API and the local fallback store.
//!
//! Both carry `{ "payload": { "elements": [...] } }`. Unknown sibling fields
//! on the remote response (run id, timestamps) are ignored.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use plan_canvas::EditElement;
use serde::{Deserialize, Serialize};

/// Local-store key used before any run has been associated.
pub const NO_RUN_KEY: &str = "planEdits:no-run";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanElements {
    #[serde(default)]
    pub elements: Vec<EditElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanPayload {
    #[serde(default)]
    pub payload: PlanElements,
}

impl PlanPayload {
    #[must_use]
    pub fn new(elements: Vec<EditElement>) -> Self {
        Self { payload: PlanElements { elements } }
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<EditElement> {
        self.payload.elements
    }
}

/// Local-store key for a run, or the no-run sentinel.
#[must_use]
pub fn local_key(run_id: Option<&str>) -> String {
    match run_id {
        Some(id) => format!("planEdits:{id}"),
        None => NO_RUN_KEY.to_owned(),
    }
}

//! Host state and file URL resolution.
//!
//! DESIGN
//! ======
//! The host page pushes `{ project, run, outputs }` whenever its selection
//! changes. [`PlanSession`] keeps the last state, resolves the drawing and
//! model URLs from it, and tells the caller what changed so that loads are
//! triggered only when the run actually moves.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use plan_viewport3d::ProjectSpec;
use serde::Deserialize;
use tracing::info;

/// Project fields carried by the host. Numeric fields arrive as free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub region: String,
    pub building_type: String,
    pub floors: String,
    pub gfa: String,
    pub core_ratio: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunInfo {
    pub id: String,
    pub status: String,
}

/// Generated files of a run. Only the viewer's two files are read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RunOutputs {
    pub plan_svg_file: Option<String>,
    pub gltf_file: Option<String>,
}

/// Detail of the host's state-push event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HostState {
    pub project: Option<ProjectInfo>,
    pub run: Option<RunInfo>,
    pub outputs: Option<RunOutputs>,
}

impl HostState {
    /// Parse the JSON detail of a state-push event.
    ///
    /// # Errors
    ///
    /// Returns an error if the detail is not a JSON object of the expected shape.
    pub fn from_json(detail: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(detail)
    }

    #[must_use]
    pub fn run_id(&self) -> Option<&str> {
        self.run.as_ref().map(|r| r.id.as_str()).filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str()).filter(|id| !id.is_empty())
    }
}

impl ProjectInfo {
    /// The free-text fields the massing box is computed from.
    #[must_use]
    pub fn massing_project(&self) -> ProjectSpec {
        ProjectSpec {
            building_type: self.building_type.clone(),
            region: self.region.clone(),
            floors: self.floors.clone(),
            gfa: self.gfa.clone(),
            core_ratio: self.core_ratio.clone(),
        }
    }
}

/// What a state push changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostUpdate {
    pub run_changed: bool,
    pub drawing_changed: bool,
    pub model_changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlanSession {
    file_base: String,
    state: HostState,
    drawing_url: Option<String>,
    model_url: Option<String>,
}

impl PlanSession {
    #[must_use]
    pub fn new(file_base: &str) -> Self {
        Self { file_base: file_base.trim_end_matches('/').to_owned(), ..Self::default() }
    }

    /// Change the base file URLs are resolved against. Takes effect on the
    /// next state push.
    pub fn set_file_base(&mut self, file_base: &str) {
        file_base.trim_end_matches('/').clone_into(&mut self.file_base);
    }

    #[must_use]
    pub fn file_base(&self) -> &str {
        &self.file_base
    }

    /// Replace the host state and re-resolve file URLs.
    pub fn apply_host_state(&mut self, state: HostState) -> HostUpdate {
        let run_changed = state.run_id() != self.state.run_id();
        let outputs = state.outputs.clone().unwrap_or_default();
        let drawing_url = self.resolve(&state, outputs.plan_svg_file.as_deref());
        let model_url = self.resolve(&state, outputs.gltf_file.as_deref());

        let update = HostUpdate {
            run_changed,
            drawing_changed: drawing_url != self.drawing_url,
            model_changed: model_url != self.model_url,
        };
        if run_changed {
            info!(run_id = state.run_id().unwrap_or("-"), "host run changed");
        }
        self.state = state;
        self.drawing_url = drawing_url;
        self.model_url = model_url;
        update
    }

    #[must_use]
    pub fn state(&self) -> &HostState {
        &self.state
    }

    #[must_use]
    pub fn run_id(&self) -> Option<&str> {
        self.state.run_id()
    }

    #[must_use]
    pub fn drawing_url(&self) -> Option<&str> {
        self.drawing_url.as_deref()
    }

    #[must_use]
    pub fn model_url(&self) -> Option<&str> {
        self.model_url.as_deref()
    }

    fn resolve(&self, state: &HostState, file_name: Option<&str>) -> Option<String> {
        let file_name = file_name.filter(|f| !f.is_empty())?;
        Some(file_url(&self.file_base, state.project_id()?, state.run_id()?, file_name))
    }
}

/// `{base}/files/{projectId}/{runId}/{fileName}`.
#[must_use]
pub fn file_url(base: &str, project_id: &str, run_id: &str, file_name: &str) -> String {
    format!("{}/files/{project_id}/{run_id}/{file_name}", base.trim_end_matches('/'))
}

//! Plan view controller: one owner for the edit engine, the 3D viewport, and
//! the persistence and asset plumbing that feeds them.
//!
//! DESIGN
//! ======
//! The host mounts one [`PlanController`] per view. State pushes go through
//! [`PlanController::apply_host_state`], which works in a fixed order:
//!
//! 1. A save still waiting for its timer is flushed under the previous run.
//! 2. When the run changed, the run's edits are loaded (once per run) and
//!    replace the engine's collection.
//! 3. When the drawing URL changed, the base drawing is fetched, parsed, and
//!    attached to the engine.
//! 4. When the project changed, the massing is recomputed; when the model URL
//!    changed, the model is fetched into the viewport.
//!
//! Engine input is passed through [`PlanController::dispatch`]. It turns
//! `SaveRequested` into a debounced save of the current collection under the
//! current run and hands every other action back to the host.
//!
//! ERROR HANDLING
//! ==============
//! Each load fails on its own and never blocks the others. A drawing that
//! cannot be fetched or parsed is returned in [`HostReport::drawing_error`];
//! a model that cannot be fetched leaves the placeholder massing in place;
//! remote persistence failures degrade to the local store inside the bridge.
//! Only a local store failure during the edit load is reported as
//! [`HostReport::load_error`].

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::Arc;

use plan_canvas::{Action, EngineCore};
use plan_viewport3d::{ContentKind, MassingBox, Viewport3d};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::assets::AssetLoader;
use crate::bridge::{LoadSource, PersistenceBridge};
use crate::config::SyncConfig;
use crate::debounce::{DebouncedSaver, SaveReport};
use crate::error::SyncError;
use crate::session::{HostState, HostUpdate, PlanSession};
use crate::store::LocalStore;

/// What one host state push did.
#[derive(Debug, Default)]
pub struct HostReport {
    pub update: HostUpdate,
    /// Engine actions produced by the loads, already routed.
    pub actions: Vec<Action>,
    /// Save of the previous run's pending edits, if one was waiting.
    pub flushed: Option<SaveReport>,
    /// Where the run's edits came from, when they were loaded.
    pub loaded: Option<LoadSource>,
    pub load_error: Option<SyncError>,
    pub drawing_error: Option<SyncError>,
    /// Viewport content after a model change.
    pub model: Option<ContentKind>,
}

pub struct PlanController {
    config: SyncConfig,
    api: Arc<ApiClient>,
    engine: EngineCore,
    viewport: Viewport3d,
    session: PlanSession,
    assets: AssetLoader,
    bridge: Arc<PersistenceBridge>,
    saver: DebouncedSaver,
}

impl PlanController {
    /// Build a controller and the receiver for its debounced save reports.
    #[must_use]
    pub fn new(
        config: SyncConfig,
        api: Arc<ApiClient>,
        store: Arc<dyn LocalStore>,
        engine: EngineCore,
        viewport: Viewport3d,
    ) -> (Self, mpsc::UnboundedReceiver<SaveReport>) {
        let bridge = Arc::new(PersistenceBridge::new(Arc::clone(&api), store));
        let (saver, reports) = DebouncedSaver::new(Arc::clone(&bridge), config.save_debounce());
        let file_base = config.file_base_or(api.resolved_base().as_deref()).unwrap_or_default();
        let controller = Self {
            session: PlanSession::new(&file_base),
            assets: AssetLoader::new(Arc::clone(&api)),
            config,
            api,
            engine,
            viewport,
            bridge,
            saver,
        };
        (controller, reports)
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    /// Direct engine access for calls that produce no actions (`on_frame`, queries).
    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport3d {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport3d {
        &mut self.viewport
    }

    #[must_use]
    pub fn session(&self) -> &PlanSession {
        &self.session
    }

    #[must_use]
    pub fn bridge(&self) -> &Arc<PersistenceBridge> {
        &self.bridge
    }

    /// Whether a debounced save is waiting for its timer.
    #[must_use]
    pub fn save_pending(&self) -> bool {
        self.saver.is_pending()
    }

    /// Run an engine operation and route its actions.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, op: impl FnOnce(&mut EngineCore) -> Vec<Action>) -> Vec<Action> {
        let actions = op(&mut self.engine);
        self.route(actions)
    }

    /// Schedule a save for every `SaveRequested`; return the rest for the host.
    pub fn route(&mut self, actions: Vec<Action>) -> Vec<Action> {
        let mut rest = Vec::with_capacity(actions.len());
        let mut save = false;
        for action in actions {
            if action == Action::SaveRequested {
                save = true;
            } else {
                rest.push(action);
            }
        }
        if save {
            let run_id = self.session.run_id().map(str::to_owned);
            debug!(run_id = run_id.as_deref().unwrap_or("-"), count = self.engine.elements().len(), "save scheduled");
            self.saver.schedule(run_id.as_deref(), self.engine.elements().to_vec());
        }
        rest
    }

    /// Save pending edits now.
    pub async fn flush(&self) -> Option<SaveReport> {
        self.saver.flush().await
    }

    /// Apply a host state push and run the loads it calls for.
    pub async fn apply_host_state(&mut self, state: HostState) -> HostReport {
        let mut report = HostReport::default();
        let project_changed = state.project != self.session.state().project;
        let run_changed = state.run_id() != self.session.run_id();

        if run_changed {
            report.flushed = self.saver.flush().await;
        }
        if let Some(base) = self.config.file_base_or(self.api.resolved_base().as_deref()) {
            self.session.set_file_base(&base);
        }
        report.update = self.session.apply_host_state(state);

        if report.update.run_changed {
            self.load_edits(&mut report).await;
        }
        if report.update.drawing_changed {
            self.load_drawing(&mut report).await;
        }
        if project_changed {
            if let Some(project) = &self.session.state().project {
                let floor_height = self.viewport.config().floor_height;
                self.viewport
                    .set_massing(MassingBox::from_project(&project.massing_project(), floor_height));
            }
        }
        if report.update.model_changed {
            report.model = Some(self.load_model().await);
        }
        report
    }

    async fn load_edits(&mut self, report: &mut HostReport) {
        let run_id = self.session.run_id().map(str::to_owned);
        match self.bridge.load(run_id.as_deref()).await {
            Ok(Some(loaded)) => {
                report.loaded = Some(loaded.source);
                let actions = self.engine.load_elements(loaded.elements);
                report.actions.extend(self.route(actions));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(run_id = run_id.as_deref().unwrap_or("-"), error = %e, "plan edits could not be loaded");
                report.load_error = Some(e);
            }
        }
    }

    async fn load_drawing(&mut self, report: &mut HostReport) {
        let Some(url) = self.session.drawing_url().map(str::to_owned) else {
            return;
        };
        match self.assets.load_drawing(&url).await {
            Ok(Some(drawing)) => {
                let actions = self.engine.set_drawing(&drawing);
                report.actions.extend(self.route(actions));
            }
            Ok(None) => debug!(url, "superseded drawing ignored"),
            Err(e) => {
                warn!(url, error = %e, "base drawing failed to load");
                report.drawing_error = Some(e);
            }
        }
    }

    async fn load_model(&mut self) -> ContentKind {
        let Some(url) = self.session.model_url().map(str::to_owned) else {
            self.viewport.clear_model();
            return self.viewport.content_kind();
        };
        match self.assets.load_model(&url).await {
            Ok(Some(bytes)) => self.viewport.load_model_bytes(bytes),
            Ok(None) => self.viewport.content_kind(),
            Err(e) => {
                warn!(url, error = %e, "model fetch failed; showing placeholder massing");
                self.viewport.clear_model();
                self.viewport.content_kind()
            }
        }
    }
}

impl std::fmt::Debug for PlanController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanController")
            .field("run_id", &self.session.run_id())
            .field("elements", &self.engine.elements().len())
            .finish_non_exhaustive()
    }
}

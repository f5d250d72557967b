//! Edit engine: the annotation state machine driven by host input events.
//!
//! DESIGN
//! ======
//! `EngineCore` owns every piece of mutable editing state: the element store,
//! camera, active tool, gesture, history, snap cache, and frame scheduler. The
//! host constructs one per mounted view and feeds it pointer, wheel, and key
//! events. Handlers run to completion and return a list of [`Action`]s for the
//! host to carry out (persist, request a frame, change the cursor).
//!
//! Pointer moves are not processed immediately. They land in a one-slot
//! buffer and are applied when the host calls [`EngineCore::on_frame`], so a
//! burst of moves within one display frame costs one update and one render.
//!
//! Every committed mutation (draw, drag that moved, erase, text edit) pushes a
//! full snapshot onto the history, rebuilds the snap cache, and asks the host
//! to save.
//!
//! ERROR HANDLING
//! ==============
//! Input handlers never fail; events that do not apply to the current state
//! are ignored. Id-addressed operations called by the host (`erase`,
//! `set_text`) return [`EngineError`] when the id is unknown.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use plan_drawing::Drawing;
use plan_geom::{BBox, Point, distance};
use tracing::{debug, info};

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::consts::DEFAULT_TEXT_LABEL;
use crate::doc::{DocStore, DoorOrientation, EditElement, EditShape, ElementId, clamp_door_width};
use crate::error::EngineError;
use crate::frame::{FrameScheduler, PendingPointer};
use crate::history::EditHistory;
use crate::hit::hit_test;
use crate::input::{Button, InputState, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::render::{Scene, build_scene};
use crate::snap::SnapCache;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(EditElement),
    ElementUpdated(EditElement),
    ElementDeleted { id: ElementId },
    HistoryChanged { can_undo: bool, can_redo: bool },
    /// The collection changed; the host schedules a debounced save.
    SaveRequested,
    /// The host should call [`EngineCore::on_frame`] on the next display frame.
    RenderRequested,
    SetCursor(String),
}

/// Build the element a draw gesture from `start` to `end` produces, if any.
///
/// Two-point tools need measurable movement. A door click yields a
/// minimum-width door facing east. A text click yields the default label.
#[must_use]
pub fn shape_for_gesture(tool: Tool, start: Point, end: Point) -> Option<EditShape> {
    let moved = distance(start, end) > f64::EPSILON;
    match tool {
        Tool::Wall if moved => Some(EditShape::Wall { start, end }),
        Tool::Window if moved => Some(EditShape::Window { start, end }),
        Tool::Dimension if moved => Some(EditShape::Dimension { start, end }),
        Tool::Door => Some(EditShape::Door {
            position: start,
            width: clamp_door_width(distance(start, end)),
            orientation: DoorOrientation::from_drag(end - start),
        }),
        Tool::Text => Some(EditShape::Text { position: start, text: DEFAULT_TEXT_LABEL.to_owned() }),
        _ => None,
    }
}

/// Core engine state. Independent of any browser API so it can be tested natively.
pub struct EngineCore {
    pub doc: DocStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub config: EngineConfig,
    pub viewport_width: f64,
    pub viewport_height: f64,
    history: EditHistory,
    snap: SnapCache,
    drawing_bounds: Option<BBox>,
    /// The current drawing has been fitted into a non-empty viewport.
    fitted: bool,
    grid_x: Vec<f64>,
    grid_y: Vec<f64>,
    frames: FrameScheduler,
    pending: PendingPointer,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            doc: DocStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::Idle,
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            history: EditHistory::default(),
            snap: SnapCache::new(config.snap_threshold_min, config.grid_step),
            drawing_bounds: None,
            fitted: false,
            grid_x: Vec::new(),
            grid_y: Vec::new(),
            frames: FrameScheduler::default(),
            pending: PendingPointer::default(),
        }
    }

    // =============================================================
    // Data inputs
    // =============================================================

    /// Attach a parsed base drawing: adopt its grid and scale, then fit the view.
    pub fn set_drawing(&mut self, drawing: &Drawing) -> Vec<Action> {
        self.set_base(drawing.bounds(), drawing.grid_x.clone(), drawing.grid_y.clone())
    }

    /// Attach a base drawing by its bounds and grid positions.
    pub fn set_base(&mut self, bounds: BBox, grid_x: Vec<f64>, grid_y: Vec<f64>) -> Vec<Action> {
        self.drawing_bounds = Some(bounds);
        self.fitted = false;
        self.grid_x = grid_x;
        self.grid_y = grid_y;
        self.snap.set_threshold(self.config.snap_threshold(bounds.width(), bounds.height()));
        self.rebuild_snap(None);
        let mut actions = Vec::new();
        self.fit_inner(&mut actions);
        actions
    }

    /// Replace the collection wholesale (initial load). History restarts here.
    pub fn load_elements(&mut self, elements: Vec<EditElement>) -> Vec<Action> {
        info!(count = elements.len(), "loaded plan edits");
        self.cancel_gesture();
        self.history.reset(elements.clone());
        self.doc.load_snapshot(elements);
        self.ui.selected_id = None;
        self.rebuild_snap(None);
        let mut actions = vec![self.history_changed()];
        self.request_render(&mut actions);
        actions
    }

    // =============================================================
    // Viewport
    // =============================================================

    /// Update the viewport size in CSS pixels. A drawing attached before the
    /// viewport had a size is fitted on the first non-empty size.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport_width = width;
        self.viewport_height = height;
        let mut actions = Vec::new();
        if !self.fitted {
            self.fit_inner(&mut actions);
        }
        self.request_render(&mut actions);
        actions
    }

    /// Fit the base drawing into the viewport.
    pub fn fit_to_view(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.fit_inner(&mut actions);
        actions
    }

    /// Toolbar zoom about the viewport center.
    pub fn zoom_by_factor(&mut self, factor: f64) -> Vec<Action> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        let mut actions = Vec::new();
        if self.camera.zoom_by(center, factor, &self.config) {
            self.request_render(&mut actions);
        }
        actions
    }

    /// Rotate the view about the viewport center.
    pub fn rotate_view(&mut self, degrees: f64) -> Vec<Action> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.camera.rotate_by(center, degrees);
        let mut actions = Vec::new();
        self.request_render(&mut actions);
        actions
    }

    fn fit_inner(&mut self, actions: &mut Vec<Action>) {
        let Some(bounds) = self.drawing_bounds else {
            return;
        };
        self.camera
            .fit_to_container(bounds, self.viewport_width, self.viewport_height, &self.config);
        self.fitted = self.viewport_width > 0.0 && self.viewport_height > 0.0;
        info!(zoom = self.camera.zoom, fitted = self.fitted, "fit drawing to view");
        self.request_render(actions);
    }

    // =============================================================
    // Tool / options
    // =============================================================

    /// Switch tools. Any in-progress gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let had_gesture = self.cancel_gesture();
        self.ui.tool = tool;
        let mut actions = vec![Action::SetCursor(tool.cursor().to_owned())];
        if had_gesture {
            self.request_render(&mut actions);
        }
        actions
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap.set_enabled(enabled);
    }

    // =============================================================
    // Input events
    // =============================================================

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.flush_pending();
        let mut actions = Vec::new();
        if !matches!(self.input, InputState::Idle) {
            return actions;
        }

        if button == Button::Middle || (button == Button::Primary && self.ui.tool == Tool::Pan) {
            self.input = InputState::Panning { start_screen: screen, start_pan: self.camera.pan() };
            actions.push(Action::SetCursor("grabbing".to_owned()));
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        let point = self.camera.screen_to_drawing(screen);
        match self.ui.tool {
            Tool::Select => {
                let hit = hit_test(point, self.doc.elements(), self.hit_tolerance());
                if self.ui.selected_id != hit {
                    self.ui.selected_id = hit;
                    self.request_render(&mut actions);
                }
                let original = hit.and_then(|id| self.doc.get(&id)).cloned();
                if let Some(original) = original {
                    self.rebuild_snap(Some(original.id));
                    self.input = InputState::Dragging { id: original.id, start: point, original };
                }
            }
            Tool::Erase => {
                if let Some(id) = hit_test(point, self.doc.elements(), self.hit_tolerance()) {
                    self.erase_inner(id, &mut actions);
                }
            }
            Tool::Wall | Tool::Door | Tool::Window | Tool::Dimension | Tool::Text => {
                let start = self.snap.snap_point(point);
                self.input = InputState::Drawing { tool: self.ui.tool, start, current: start };
                self.request_render(&mut actions);
            }
            Tool::Pan => {}
        }
        actions
    }

    /// Record a move. It is applied on the next frame; later moves replace it.
    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if matches!(self.input, InputState::Idle) {
            return actions;
        }
        self.pending.set(screen, modifiers);
        self.request_render(&mut actions);
        actions
    }

    pub fn on_pointer_up(&mut self, screen: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.pending.take();
        self.apply_move(screen);

        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle => {}
            InputState::Panning { .. } => {
                actions.push(Action::SetCursor(self.ui.tool.cursor().to_owned()));
            }
            InputState::Dragging { id, original, .. } => {
                let current = self.doc.get(&id).cloned();
                match current {
                    Some(moved) if moved.shape != original.shape => {
                        actions.push(Action::ElementUpdated(moved));
                        self.commit(&mut actions);
                    }
                    _ => self.rebuild_snap(None),
                }
            }
            InputState::Drawing { tool, start, current } => {
                if let Some(shape) = shape_for_gesture(tool, start, current) {
                    let element = EditElement::new(shape);
                    debug!(id = %element.id, kind = element.shape.type_name(), "created element");
                    self.doc.push(element.clone());
                    actions.push(Action::ElementCreated(element));
                    self.commit(&mut actions);
                } else {
                    self.request_render(&mut actions);
                }
            }
        }
        actions
    }

    /// Wheel zooms about the pointer.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.camera.zoom_wheel(screen, delta.dy, &self.config) {
            self.request_render(&mut actions);
        }
        actions
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => {
                let had_gesture = self.cancel_gesture();
                let had_selection = self.ui.selected_id.take().is_some();
                let mut actions = Vec::new();
                if had_gesture || had_selection {
                    self.request_render(&mut actions);
                }
                actions
            }
            "Delete" | "Backspace" => {
                let mut actions = Vec::new();
                if let Some(id) = self.ui.selected_id {
                    self.erase_inner(id, &mut actions);
                }
                actions
            }
            "z" | "Z" if modifiers.command() => {
                if modifiers.shift {
                    self.redo()
                } else {
                    self.undo()
                }
            }
            "y" | "Y" if modifiers.command() => self.redo(),
            _ => Vec::new(),
        }
    }

    // =============================================================
    // Frame
    // =============================================================

    /// Animation-frame callback: apply the pending move and return the scene
    /// if anything changed since the last frame.
    pub fn on_frame(&mut self) -> Option<Scene> {
        self.flush_pending();
        if self.frames.begin_frame() { Some(self.scene()) } else { None }
    }

    /// Current annotation layer, including the live preview.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(self.doc.elements(), self.ui.selected_id, self.preview().as_ref())
    }

    /// The not-yet-committed shape of an in-progress draw.
    #[must_use]
    pub fn preview(&self) -> Option<EditShape> {
        match &self.input {
            InputState::Drawing { tool, start, current } => shape_for_gesture(*tool, *start, *current),
            _ => None,
        }
    }

    // =============================================================
    // Commands
    // =============================================================

    pub fn undo(&mut self) -> Vec<Action> {
        self.cancel_gesture();
        let Some(snapshot) = self.history.undo().map(<[EditElement]>::to_vec) else {
            return Vec::new();
        };
        self.restore(snapshot)
    }

    pub fn redo(&mut self) -> Vec<Action> {
        self.cancel_gesture();
        let Some(snapshot) = self.history.redo().map(<[EditElement]>::to_vec) else {
            return Vec::new();
        };
        self.restore(snapshot)
    }

    /// Delete an element by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ElementNotFound`] if no element has `id`.
    pub fn erase(&mut self, id: &ElementId) -> Result<Vec<Action>, EngineError> {
        if self.doc.get(id).is_none() {
            return Err(EngineError::ElementNotFound(*id));
        }
        let mut actions = Vec::new();
        self.erase_inner(*id, &mut actions);
        Ok(actions)
    }

    /// Replace the label of a text element.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ElementNotFound`] for an unknown id and
    /// [`EngineError::NotText`] if the element is not a text annotation.
    pub fn set_text(&mut self, id: &ElementId, text: String) -> Result<Vec<Action>, EngineError> {
        let Some(element) = self.doc.get(id) else {
            return Err(EngineError::ElementNotFound(*id));
        };
        let EditShape::Text { position, .. } = element.shape else {
            return Err(EngineError::NotText(*id));
        };
        let shape = EditShape::Text { position, text };
        self.doc.set_shape(id, shape.clone());
        let mut actions = vec![Action::ElementUpdated(EditElement { id: *id, shape })];
        self.commit(&mut actions);
        Ok(actions)
    }

    // =============================================================
    // Queries
    // =============================================================

    #[must_use]
    pub fn elements(&self) -> &[EditElement] {
        self.doc.elements()
    }

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.snap.enabled()
    }

    #[must_use]
    pub fn snap_threshold(&self) -> f64 {
        self.snap.threshold()
    }

    /// Snap a drawing-space point with the current cache.
    #[must_use]
    pub fn snap_point(&self, p: Point) -> Point {
        self.snap.snap_point(p)
    }

    #[must_use]
    pub fn drawing_bounds(&self) -> Option<BBox> {
        self.drawing_bounds
    }

    // =============================================================
    // Internals
    // =============================================================

    fn hit_tolerance(&self) -> f64 {
        self.camera.screen_dist_to_drawing(self.config.hit_slop_px)
    }

    fn flush_pending(&mut self) {
        if let Some((screen, _)) = self.pending.take() {
            self.apply_move(screen);
        }
    }

    fn apply_move(&mut self, screen: Point) {
        let point = self.camera.screen_to_drawing(screen);
        match &mut self.input {
            InputState::Idle => {}
            InputState::Panning { start_screen, start_pan } => {
                let (start_screen, start_pan) = (*start_screen, *start_pan);
                self.camera.pan_from(start_pan, screen - start_screen);
            }
            InputState::Dragging { id, start, original } => {
                let delta = point - *start;
                let delta = match original.shape.anchors().first() {
                    Some(&anchor) => self.snap.snap_point(anchor + delta) - anchor,
                    None => delta,
                };
                let shape = original.shape.translated(delta);
                let id = *id;
                self.doc.set_shape(&id, shape);
            }
            InputState::Drawing { current, .. } => {
                *current = self.snap.snap_point(point);
            }
        }
    }

    /// Abandon the active gesture. A drag is reverted. Returns whether one was active.
    fn cancel_gesture(&mut self) -> bool {
        self.pending.take();
        match std::mem::take(&mut self.input) {
            InputState::Idle => false,
            InputState::Dragging { id, original, .. } => {
                self.doc.set_shape(&id, original.shape);
                self.rebuild_snap(None);
                true
            }
            InputState::Panning { .. } | InputState::Drawing { .. } => true,
        }
    }

    fn erase_inner(&mut self, id: ElementId, actions: &mut Vec<Action>) {
        if self.doc.remove(&id).is_none() {
            return;
        }
        debug!(%id, "erased element");
        if self.ui.selected_id == Some(id) {
            self.ui.selected_id = None;
        }
        actions.push(Action::ElementDeleted { id });
        self.commit(actions);
    }

    fn restore(&mut self, snapshot: Vec<EditElement>) -> Vec<Action> {
        self.doc.load_snapshot(snapshot);
        if let Some(id) = self.ui.selected_id {
            if self.doc.get(&id).is_none() {
                self.ui.selected_id = None;
            }
        }
        self.rebuild_snap(None);
        let mut actions = vec![self.history_changed(), Action::SaveRequested];
        self.request_render(&mut actions);
        actions
    }

    fn commit(&mut self, actions: &mut Vec<Action>) {
        self.history.commit(self.doc.elements());
        self.rebuild_snap(None);
        actions.push(self.history_changed());
        actions.push(Action::SaveRequested);
        self.request_render(actions);
    }

    fn history_changed(&self) -> Action {
        Action::HistoryChanged { can_undo: self.history.can_undo(), can_redo: self.history.can_redo() }
    }

    fn rebuild_snap(&mut self, exclude: Option<ElementId>) {
        self.snap.rebuild(&self.grid_x, &self.grid_y, self.doc.elements(), exclude);
        debug!(xs = self.snap.xs().len(), ys = self.snap.ys().len(), "rebuilt snap cache");
    }

    fn request_render(&mut self, actions: &mut Vec<Action>) {
        if self.frames.invalidate() {
            actions.push(Action::RenderRequested);
        }
    }
}

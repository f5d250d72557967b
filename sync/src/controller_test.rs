#![allow(clippy::float_cmp)]

use plan_canvas::{Button, EditShape, Modifiers, Tool};
use plan_geom::Point;
use plan_viewport3d::{ProjectSpec, ViewportConfig};

use super::*;
use crate::bridge::SaveOutcome;
use crate::session::{ProjectInfo, RunInfo, RunOutputs};
use crate::store::MemoryStore;
use crate::test_support::FakeTransport;

const BASE: &str = "http://api.test";
const SVG: &str = r#"<svg width="30" height="20"><line class="wall" x1="0" y1="0" x2="10" y2="0"/></svg>"#;
const GLTF: &str = r#"{"asset":{"version":"2.0"}}"#;
const EMPTY_PLAN: &str = r#"{"payload":{"elements":[]}}"#;

// =============================================================
// Helpers
// =============================================================

fn plan_url(run: &str) -> String {
    format!("{BASE}/api/runs/{run}/plan")
}

fn file(run: &str, name: &str) -> String {
    format!("{BASE}/files/p1/{run}/{name}")
}

fn state(run: &str) -> HostState {
    HostState {
        project: Some(ProjectInfo {
            id: "p1".to_owned(),
            floors: "10".to_owned(),
            gfa: "20000".to_owned(),
            ..ProjectInfo::default()
        }),
        run: Some(RunInfo { id: run.to_owned(), status: "complete".to_owned() }),
        outputs: Some(RunOutputs {
            plan_svg_file: Some("plan.svg".to_owned()),
            gltf_file: Some("model.gltf".to_owned()),
        }),
    }
}

/// Serve a drawing, a model, and an empty plan for `run`.
fn serve_run(fake: &FakeTransport, run: &str) {
    fake.route("GET", &file(run, "plan.svg"), 200, SVG);
    fake.route("GET", &file(run, "model.gltf"), 200, GLTF);
    fake.route("GET", &plan_url(run), 200, EMPTY_PLAN);
    fake.route("POST", &plan_url(run), 200, "{}");
}

fn controller(fake: &Arc<FakeTransport>) -> PlanController {
    let config = SyncConfig {
        api_base: Some(BASE.to_owned()),
        local_default: BASE.to_owned(),
        ..SyncConfig::default()
    };
    let api = Arc::new(ApiClient::new(fake.clone(), config.candidate_bases()));
    let massing = MassingBox::from_project(&ProjectSpec::default(), 3.3);
    let viewport = Viewport3d::new(ViewportConfig::default(), massing);
    let mut engine = EngineCore::default();
    engine.set_viewport(600.0, 400.0);
    let (controller, _reports) = PlanController::new(config, api, Arc::new(MemoryStore::new()), engine, viewport);
    controller
}

/// Draw a wall between two drawing points through the controller.
fn draw_wall(controller: &mut PlanController, from: Point, to: Point) -> Vec<Action> {
    let (a, b) = {
        let camera = &controller.engine().camera;
        (camera.drawing_to_screen(from), camera.drawing_to_screen(to))
    };
    let mut actions = controller.dispatch(|e| e.set_tool(Tool::Wall));
    actions.extend(controller.dispatch(|e| e.on_pointer_down(a, Button::Primary, Modifiers::default())));
    actions.extend(controller.dispatch(|e| e.on_pointer_move(b, Modifiers::default())));
    actions.extend(controller.dispatch(|e| e.on_pointer_up(b, Button::Primary, Modifiers::default())));
    actions
}

// =============================================================
// Host state pushes
// =============================================================

#[tokio::test]
async fn host_push_loads_drawing_edits_and_model() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    let mut controller = controller(&fake);

    let report = controller.apply_host_state(state("42")).await;
    assert_eq!(report.update, HostUpdate { run_changed: true, drawing_changed: true, model_changed: true });
    assert_eq!(report.loaded, Some(LoadSource::Remote));
    assert!(report.drawing_error.is_none());
    assert_eq!(report.model, Some(ContentKind::Model));
    assert!(report.actions.contains(&Action::RenderRequested));

    let bounds = controller.engine().drawing_bounds().unwrap();
    assert_eq!(bounds.width(), 30.0);
    assert_eq!(controller.viewport().massing().floors, 10.0);
}

#[tokio::test]
async fn repeated_push_does_not_reload() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    let mut controller = controller(&fake);
    controller.apply_host_state(state("42")).await;
    let requests = fake.requests().len();

    let report = controller.apply_host_state(state("42")).await;
    assert_eq!(report.update, HostUpdate::default());
    assert!(report.loaded.is_none());
    assert!(report.model.is_none());
    assert_eq!(fake.requests().len(), requests);
}

#[tokio::test]
async fn bad_drawing_does_not_block_model_or_edits() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    fake.route("GET", &file("42", "plan.svg"), 200, "<html></html>");
    let mut controller = controller(&fake);

    let report = controller.apply_host_state(state("42")).await;
    assert!(matches!(report.drawing_error, Some(SyncError::Parse(_))));
    assert_eq!(report.loaded, Some(LoadSource::Remote));
    assert_eq!(report.model, Some(ContentKind::Model));
    assert!(controller.engine().drawing_bounds().is_none());
}

#[tokio::test]
async fn missing_model_keeps_placeholder_massing() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    fake.unroute("GET", &file("42", "model.gltf"));
    let mut controller = controller(&fake);

    let report = controller.apply_host_state(state("42")).await;
    assert_eq!(report.model, Some(ContentKind::Placeholder));
}

// =============================================================
// Saves
// =============================================================

#[tokio::test]
async fn save_requests_are_scheduled_not_returned() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    let mut controller = controller(&fake);
    controller.apply_host_state(state("42")).await;

    let actions = draw_wall(&mut controller, Point::new(2.0, 2.0), Point::new(6.0, 2.0));
    assert!(!actions.contains(&Action::SaveRequested));
    assert!(actions.iter().any(|a| matches!(a, Action::ElementCreated(_))));
    assert!(controller.save_pending());
    assert!(fake.posts().is_empty());
}

#[tokio::test]
async fn edits_survive_into_a_new_session() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    let mut first = controller(&fake);
    first.apply_host_state(state("42")).await;
    draw_wall(&mut first, Point::new(2.0, 2.0), Point::new(6.0, 2.0));
    draw_wall(&mut first, Point::new(2.0, 8.0), Point::new(2.0, 14.0));
    assert_eq!(first.engine().elements().len(), 2);

    let report = first.flush().await.unwrap();
    assert_eq!(report.unwrap(), SaveOutcome::Remote);
    let posts = fake.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].url, plan_url("42"));
    let saved = serde_json::to_string(posts[0].body.as_ref().unwrap()).unwrap();
    fake.route("GET", &plan_url("42"), 200, &saved);

    let mut second = controller(&fake);
    let report = second.apply_host_state(state("42")).await;
    assert_eq!(report.loaded, Some(LoadSource::Remote));
    assert_eq!(second.engine().elements(), first.engine().elements());
    assert!(matches!(second.engine().elements()[0].shape, EditShape::Wall { .. }));
}

#[tokio::test]
async fn run_change_saves_pending_edits_under_the_old_run() {
    let fake = Arc::new(FakeTransport::new());
    serve_run(&fake, "42");
    serve_run(&fake, "43");
    let mut controller = controller(&fake);
    controller.apply_host_state(state("42")).await;
    draw_wall(&mut controller, Point::new(2.0, 2.0), Point::new(6.0, 2.0));
    assert!(controller.save_pending());

    let report = controller.apply_host_state(state("43")).await;
    assert_eq!(report.flushed.unwrap().unwrap(), SaveOutcome::Remote);
    let posts = fake.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].url, plan_url("42"));

    assert_eq!(report.loaded, Some(LoadSource::Remote));
    assert!(controller.engine().elements().is_empty());
    assert!(!controller.save_pending());
}

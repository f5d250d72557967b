use plan_canvas::{EditElement, EditShape};
use plan_geom::Point;

use super::*;

#[test]
fn keys_follow_run_id() {
    assert_eq!(local_key(Some("42")), "planEdits:42");
    assert_eq!(local_key(None), "planEdits:no-run");
}

#[test]
fn wire_shape_nests_elements_under_payload() {
    let wall = EditElement::new(EditShape::Wall { start: Point::new(0.0, 0.0), end: Point::new(2.0, 0.0) });
    let json = serde_json::to_value(PlanPayload::new(vec![wall.clone()])).unwrap();
    let elements = json["payload"]["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0]["type"], "wall");
    assert_eq!(elements[0]["id"], wall.id.to_string());
}

#[test]
fn response_extras_and_missing_fields_are_tolerated() {
    let with_extras: PlanPayload =
        serde_json::from_str(r#"{"run_id":"42","updated_at":"2024-01-01","payload":{"elements":[]}}"#).unwrap();
    assert!(with_extras.payload.elements.is_empty());

    let empty: PlanPayload = serde_json::from_str(r#"{"payload":{}}"#).unwrap();
    assert!(empty.into_elements().is_empty());
}

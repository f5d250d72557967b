#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn wall(ax: f64, ay: f64, bx: f64, by: f64) -> EditElement {
    EditElement::new(EditShape::Wall { start: pt(ax, ay), end: pt(bx, by) })
}

// =============================================================
// DoorOrientation
// =============================================================

#[test]
fn door_orientation_follows_dominant_axis() {
    assert_eq!(DoorOrientation::from_drag(pt(2.0, 1.0)), DoorOrientation::E);
    assert_eq!(DoorOrientation::from_drag(pt(-2.0, 1.0)), DoorOrientation::W);
    assert_eq!(DoorOrientation::from_drag(pt(0.5, 3.0)), DoorOrientation::S);
    assert_eq!(DoorOrientation::from_drag(pt(0.5, -3.0)), DoorOrientation::N);
}

#[test]
fn door_orientation_tie_and_zero_prefer_east() {
    assert_eq!(DoorOrientation::from_drag(pt(1.0, 1.0)), DoorOrientation::E);
    assert_eq!(DoorOrientation::from_drag(pt(0.0, 0.0)), DoorOrientation::E);
}

#[test]
fn door_width_is_clamped() {
    assert_eq!(clamp_door_width(0.1), 0.8);
    assert_eq!(clamp_door_width(1.0), 1.0);
    assert_eq!(clamp_door_width(9.0), 1.4);
    assert_eq!(clamp_door_width(f64::NAN), 0.8);
}

#[test]
fn open_and_closed_leaves_are_perpendicular() {
    for o in [DoorOrientation::N, DoorOrientation::S, DoorOrientation::E, DoorOrientation::W] {
        assert_eq!(o.open_dir().dot(o.closed_dir()), 0.0);
    }
}

// =============================================================
// EditShape
// =============================================================

#[test]
fn anchors_per_variant() {
    let door = EditShape::Door { position: pt(1.0, 1.0), width: 1.0, orientation: DoorOrientation::S };
    assert_eq!(door.anchors(), vec![pt(1.0, 1.0), pt(1.0, 2.0)]);
    let text = EditShape::Text { position: pt(3.0, 4.0), text: "A".to_owned() };
    assert_eq!(text.anchors(), vec![pt(3.0, 4.0)]);
    assert_eq!(wall(0.0, 0.0, 5.0, 0.0).shape.anchors(), vec![pt(0.0, 0.0), pt(5.0, 0.0)]);
}

#[test]
fn translated_moves_every_point() {
    let moved = wall(0.0, 0.0, 5.0, 0.0).shape.translated(pt(1.0, -2.0));
    assert_eq!(moved, EditShape::Wall { start: pt(1.0, -2.0), end: pt(6.0, -2.0) });

    let door = EditShape::Door { position: pt(0.0, 0.0), width: 0.9, orientation: DoorOrientation::W };
    let EditShape::Door { position, width, orientation } = door.translated(pt(2.0, 2.0)) else {
        panic!("door stays a door");
    };
    assert_eq!((position, width, orientation), (pt(2.0, 2.0), 0.9, DoorOrientation::W));
}

#[test]
fn length_and_label() {
    let dim = EditShape::Dimension { start: pt(0.0, 0.0), end: pt(3.0, 4.0) };
    assert_eq!(dim.length(), Some(5.0));
    assert_eq!(length_label(5.0), "5.00 m");
    assert_eq!(length_label(2.345_67), "2.35 m");
    let text = EditShape::Text { position: pt(0.0, 0.0), text: String::new() };
    assert_eq!(text.length(), None);
}

#[test]
fn door_bounds_cover_swing() {
    let door = EditShape::Door { position: pt(2.0, 2.0), width: 1.0, orientation: DoorOrientation::N };
    let b = door.bounds().unwrap();
    assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (2.0, 1.0, 3.0, 2.0));
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn wire_shape_is_flat_with_type_tag() {
    let id = Uuid::nil();
    let element = EditElement { id, shape: EditShape::Wall { start: pt(0.0, 0.0), end: pt(2.0, 0.0) } };
    let value = serde_json::to_value(&element).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "type": "wall",
            "start": { "x": 0.0, "y": 0.0 },
            "end": { "x": 2.0, "y": 0.0 },
        })
    );
}

#[test]
fn door_deserializes_from_wire() {
    let value = json!({
        "id": "6a3b1f34-6d9e-4d7e-9b0a-3f1f1c2d4e5f",
        "type": "door",
        "position": { "x": 1.5, "y": 2.0 },
        "width": 0.9,
        "orientation": "N",
    });
    let element: EditElement = serde_json::from_value(value).unwrap();
    assert_eq!(
        element.shape,
        EditShape::Door { position: pt(1.5, 2.0), width: 0.9, orientation: DoorOrientation::N }
    );
}

#[test]
fn unknown_type_is_rejected() {
    let value = json!({ "id": Uuid::nil(), "type": "stair", "position": { "x": 0.0, "y": 0.0 } });
    assert!(serde_json::from_value::<EditElement>(value).is_err());
}

// =============================================================
// DocStore
// =============================================================

#[test]
fn fresh_elements_have_unique_ids() {
    let a = wall(0.0, 0.0, 1.0, 0.0);
    let b = wall(0.0, 0.0, 1.0, 0.0);
    assert_ne!(a.id, b.id);
}

#[test]
fn store_keeps_insertion_order() {
    let mut store = DocStore::new();
    let (a, b, c) = (wall(0.0, 0.0, 1.0, 0.0), wall(0.0, 1.0, 1.0, 1.0), wall(0.0, 2.0, 1.0, 2.0));
    let ids = [a.id, b.id, c.id];
    store.push(a);
    store.push(b);
    store.push(c);
    let order: Vec<ElementId> = store.elements().iter().map(|e| e.id).collect();
    assert_eq!(order, ids);

    assert!(store.remove(&ids[1]).is_some());
    let order: Vec<ElementId> = store.elements().iter().map(|e| e.id).collect();
    assert_eq!(order, [ids[0], ids[2]]);
    assert!(store.remove(&ids[1]).is_none());
}

#[test]
fn set_shape_updates_in_place() {
    let mut store = DocStore::new();
    let a = wall(0.0, 0.0, 1.0, 0.0);
    let id = a.id;
    store.push(a);
    let moved = EditShape::Wall { start: pt(5.0, 5.0), end: pt(6.0, 5.0) };
    assert!(store.set_shape(&id, moved.clone()));
    assert_eq!(store.get(&id).unwrap().shape, moved);
    assert!(!store.set_shape(&Uuid::new_v4(), moved));
}

#[test]
fn load_snapshot_replaces_everything() {
    let mut store = DocStore::new();
    store.push(wall(0.0, 0.0, 1.0, 0.0));
    store.load_snapshot(vec![wall(1.0, 1.0, 2.0, 2.0), wall(3.0, 3.0, 4.0, 4.0)]);
    assert_eq!(store.len(), 2);
    store.load_snapshot(Vec::new());
    assert!(store.is_empty());
}

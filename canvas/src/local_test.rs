use serde_json::json;

use super::*;

fn card(id: &str, x: f64, y: f64) -> LocalElement {
    LocalElement {
        id: id.to_owned(),
        at: Point::new(x, y),
        color: "#3D8C6C".to_owned(),
        draggable: true,
        shape: LocalShape::Poi { label: Some("Ward".to_owned()) },
    }
}

#[test]
fn new_assigns_uuid() {
    let el = LocalElement::new(Point::new(0.0, 0.0), "#000", LocalShape::Label { text: "x".into() });
    assert!(Uuid::parse_str(&el.id).is_ok());
    assert!(el.draggable);
}

#[test]
fn ensure_id_fills_blank_only() {
    let mut blank = card("", 0.0, 0.0);
    blank.ensure_id();
    assert!(!blank.id.is_empty());

    let mut named = card("keep", 0.0, 0.0);
    named.ensure_id();
    assert_eq!(named.id, "keep");
}

#[test]
fn moved_updates_only_target() {
    let list = vec![card("a", 0.0, 0.0), card("b", 5.0, 5.0)];
    let next = moved(&list, "b", Point::new(40.0, 50.0)).unwrap();
    assert_eq!(next[0].at, Point::new(0.0, 0.0));
    assert_eq!(next[1].at, Point::new(40.0, 50.0));
    assert_eq!(list[1].at, Point::new(5.0, 5.0));
}

#[test]
fn moved_unknown_id_is_none() {
    let list = vec![card("a", 0.0, 0.0)];
    assert!(moved(&list, "zzz", Point::new(1.0, 1.0)).is_none());
}

#[test]
fn moved_locked_element_is_none() {
    let list = vec![LocalElement { draggable: false, ..card("a", 0.0, 0.0) }];
    assert!(moved(&list, "a", Point::new(1.0, 1.0)).is_none());
}

#[test]
fn deserializes_flattened_shape() {
    let el: LocalElement = serde_json::from_value(json!({
        "id": "z",
        "at": { "x": 1.0, "y": 2.0 },
        "color": "#EF4444",
        "type": "zone",
        "width": 30.0,
        "height": 20.0
    }))
    .unwrap();
    assert_eq!(el.shape, LocalShape::Zone { width: 30.0, height: 20.0, label: None });
    assert!(el.draggable);
}

#[test]
fn path_shape_defaults() {
    let el: LocalElement = serde_json::from_value(json!({
        "at": { "x": 0.0, "y": 0.0 },
        "color": "#2563EB",
        "type": "path",
        "points": [{ "x": 0.0, "y": 0.0 }, { "x": 5.0, "y": 5.0 }]
    }))
    .unwrap();
    let LocalShape::Path { points, stroke_width, tension } = el.shape else {
        panic!("expected path shape");
    };
    assert_eq!(points.len(), 2);
    assert!((stroke_width - 3.0).abs() < f64::EPSILON);
    assert!((tension - 0.5).abs() < f64::EPSILON);
}

use super::*;
use crate::element::{ElementKind, Style};
use serde_json::json;

fn element(id: i64) -> Element {
    Element::new(0.0, 0.0, 10.0, 10.0, ElementKind::Rectangle, Style::default(), id)
}

// =============================================================
// CLIENT EVENTS
// =============================================================

#[test]
fn join_room_parses_from_kebab_case_tag() {
    let event: ClientEvent = serde_json::from_value(json!({
        "event": "join-room",
        "room_id": "abc12345",
    }))
    .unwrap();
    assert_eq!(event, ClientEvent::JoinRoom { room_id: "abc12345".into() });
}

#[test]
fn draw_carries_room_and_elements() {
    let event: ClientEvent = serde_json::from_value(json!({
        "event": "draw",
        "room_id": "r1",
        "elements": [serde_json::to_value(element(4)).unwrap()],
    }))
    .unwrap();
    assert_eq!(event, ClientEvent::Draw { room_id: "r1".into(), elements: vec![element(4)] });
}

#[test]
fn undo_and_redo_carry_only_the_room() {
    let undo: ClientEvent =
        serde_json::from_value(json!({ "event": "undo", "room_id": "r1" })).unwrap();
    assert_eq!(undo, ClientEvent::Undo { room_id: "r1".into() });

    let redo: ClientEvent =
        serde_json::from_value(json!({ "event": "redo", "room_id": "r1" })).unwrap();
    assert_eq!(redo, ClientEvent::Redo { room_id: "r1".into() });
}

#[test]
fn unknown_event_tag_is_rejected() {
    let result: Result<ClientEvent, _> =
        serde_json::from_value(json!({ "event": "clear-room", "room_id": "r1" }));
    assert!(result.is_err());
}

#[test]
fn draw_with_non_array_elements_is_rejected() {
    let result: Result<ClientEvent, _> = serde_json::from_value(json!({
        "event": "draw",
        "room_id": "r1",
        "elements": "not-a-list",
    }));
    assert!(result.is_err());
}

#[test]
fn missing_room_id_is_rejected() {
    let result: Result<ClientEvent, _> = serde_json::from_value(json!({ "event": "undo" }));
    assert!(result.is_err());
}

// =============================================================
// SERVER EVENTS
// =============================================================

#[test]
fn history_serializes_with_its_tag_and_index() {
    let event = ServerEvent::History { elements: vec![element(1)], index: 3 };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event"], "history");
    assert_eq!(json["index"], 3);
    assert_eq!(json["elements"][0]["id"], 1);
}

#[test]
fn server_events_round_trip() {
    for event in [
        ServerEvent::History { elements: vec![element(1)], index: 0 },
        ServerEvent::Draw { elements: vec![element(2)], index: 1 },
        ServerEvent::Undo { elements: Vec::new(), index: 0 },
        ServerEvent::Redo { elements: vec![element(3)], index: 2 },
    ] {
        let text = serde_json::to_string(&event).unwrap();
        let restored: ServerEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(restored, event);
    }
}

#[test]
fn server_event_tags_match_the_wire_vocabulary() {
    let draw = serde_json::to_value(ServerEvent::Draw { elements: Vec::new(), index: 0 }).unwrap();
    assert_eq!(draw["event"], "draw");
    let undo = serde_json::to_value(ServerEvent::Undo { elements: Vec::new(), index: 0 }).unwrap();
    assert_eq!(undo["event"], "undo");
    let redo = serde_json::to_value(ServerEvent::Redo { elements: Vec::new(), index: 0 }).unwrap();
    assert_eq!(redo["event"], "redo");
}

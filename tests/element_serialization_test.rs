// Host interchange format of notation elements

use notation_wasm::models::{Anchor, Dialect, NotationBody, NotationElement, PercussionNote, PercussionPart, Pitch, PitchNote};
use notation_wasm::models::Duration;
use serde_json::{json, Value};

fn keyboard_element() -> NotationElement {
    let mut element = NotationElement::new_empty(Dialect::Keyboard, 2, Anchor::new(30.0, 40.0), 2).unwrap();
    if let NotationBody::Keyboard { notes, .. } = &mut element.body {
        notes.push(PitchNote::new(Pitch::C4, 10.0, Duration::Quarter));
    }
    element
}

#[test]
fn test_keyboard_element_json_shape() {
    let element = keyboard_element();
    let value: Value = serde_json::from_str(&element.to_json().unwrap()).unwrap();

    assert_eq!(value["dialect"], "keyboard");
    assert_eq!(value["pageIndex"], 2);
    assert_eq!(value["measureCount"], 2);
    assert_eq!(value["measureWidths"], json!([220.0, 220.0]));
    assert_eq!(value["anchor"], json!({"x": 30.0, "y": 40.0}));
    assert_eq!(value["notes"][0]["pitch"], "C4");
    assert_eq!(value["notes"][0]["duration"], "quarter");
    assert!(value["notes"][0].get("beamGroup").is_none());
    assert_eq!(value["chords"], json!([]));
}

#[test]
fn test_percussion_element_json_shape() {
    let mut element = NotationElement::new_empty(Dialect::Percussion, 0, Anchor::default(), 1).unwrap();
    if let NotationBody::Percussion { notes } = &mut element.body {
        notes.push(PercussionNote::new(PercussionPart::Snare, 25.0, Duration::Eighth));
    }
    let value: Value = serde_json::to_value(&element).unwrap();

    assert_eq!(value["dialect"], "percussion");
    assert_eq!(value["notes"][0]["part"], "SN");
    assert_eq!(value["notes"][0]["noteType"], "normal");
    assert!(value.get("scale").is_none());
    assert!(value.get("chords").is_none());
}

#[test]
fn test_json_round_trip_preserves_element() {
    let element = keyboard_element();
    let parsed = NotationElement::from_json(&element.to_json().unwrap()).unwrap();
    assert_eq!(parsed, element);
}

#[test]
fn test_from_json_repairs_loaded_element() {
    let json = json!({
        "id": "n1",
        "anchor": {"x": 120.0, "y": -4.0},
        "pageIndex": 0,
        "measureCount": 3,
        "measureWidths": [200.0, -1.0],
        "scale": 2.0,
        "dialect": "percussion",
        "notes": [{"part": "BD", "position": 140.0, "duration": "eighth"}]
    });
    let element = NotationElement::from_json(&json.to_string()).unwrap();

    assert_eq!(element.anchor, Anchor { x: 100.0, y: 0.0 });
    assert_eq!(element.measure_widths, vec![200.0, 190.0, 190.0]);
    assert_eq!(element.scale, None);
    let NotationBody::Percussion { notes } = &element.body else {
        panic!("expected percussion body");
    };
    assert_eq!(notes[0].position, 100.0);
    assert_eq!(notes[0].part, PercussionPart::Kick);
}

#[test]
fn test_from_json_rejects_bad_measure_count() {
    let json = json!({
        "id": "n2",
        "anchor": {"x": 0.0, "y": 0.0},
        "pageIndex": 0,
        "measureCount": 5,
        "measureWidths": [],
        "dialect": "keyboard",
        "notes": []
    });
    assert!(NotationElement::from_json(&json.to_string()).is_err());
}

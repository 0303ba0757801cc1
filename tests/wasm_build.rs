//! WASM build test
//!
//! Drives the JavaScript-facing editor class in a browser to check that the
//! module builds and the bindings round-trip values.

#![cfg(target_arch = "wasm32")]

use notation_wasm::api::{default_measure_width, render_notation, NotationEditor};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn editing_session(dialect: &str) -> NotationEditor {
    let mut editor = NotationEditor::new(dialect, 0, 10.0, 10.0, JsValue::UNDEFINED).unwrap();
    editor.choose_measure_count(2).unwrap();
    editor
}

#[wasm_bindgen_test]
fn test_editor_creation() {
    let editor = NotationEditor::new("keyboard", 0, 10.0, 10.0, JsValue::UNDEFINED).unwrap();
    assert_eq!(editor.mode(), "selectingMeasureCount");
}

#[wasm_bindgen_test]
fn test_unknown_dialect_is_rejected() {
    assert!(NotationEditor::new("banjo", 0, 0.0, 0.0, JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn test_choose_measure_count_enters_editing() {
    let editor = editing_session("percussion");
    assert_eq!(editor.mode(), "editing");
    assert!(!editor.can_save());
}

#[wasm_bindgen_test]
fn test_display_list_serializes() {
    let editor = editing_session("keyboard");
    let list = editor.display_list().unwrap();
    assert!(list.is_object());
}

#[wasm_bindgen_test]
fn test_empty_save_returns_null() {
    let mut editor = editing_session("keyboard");
    assert!(editor.save().unwrap().is_null());
}

#[wasm_bindgen_test]
fn test_default_measure_width_binding() {
    assert_eq!(default_measure_width("keyboard", 1).unwrap(), 320.0);
    assert!(default_measure_width("keyboard", 0).is_err());
}

#[wasm_bindgen_test]
fn test_render_density_must_be_zero_or_one() {
    let mut editor = editing_session("keyboard");
    let element = editor.element().unwrap();
    assert!(render_notation(element.clone(), 1.0, JsValue::from(0)).unwrap().is_object());
    assert!(render_notation(element.clone(), 1.0, JsValue::from(1)).unwrap().is_object());
    assert!(render_notation(element, 1.0, JsValue::from(2)).is_err());
}

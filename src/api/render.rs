//! Stateless render API
//!
//! Used by the page view to draw saved elements without opening an editor.

use wasm_bindgen::prelude::*;

use crate::models::{check_measure_count, Dialect, NotationBody, NotationElement};
use crate::placement::cluster_chord_slots;
use crate::renderers::{render, to_svg, RenderDensity};
use super::helpers::{deserialize, dialect_from_str, notation_error, serialize};

fn element_from_js(element: JsValue) -> Result<NotationElement, JsValue> {
    let mut element: NotationElement = deserialize(element, "Invalid notation element")?;
    element.normalize().map_err(notation_error)?;
    Ok(element)
}

fn density_from_js(density: JsValue) -> Result<RenderDensity, JsValue> {
    deserialize(density, "Invalid render density")
}

/// Render an element to a display list.
///
/// `density` is 0 for the compact page presentation, 1 for the editing one.
#[wasm_bindgen(js_name = renderNotation)]
pub fn render_notation(element: JsValue, scale_factor: f64, density: JsValue) -> Result<JsValue, JsValue> {
    let element = element_from_js(element)?;
    let list = render(&element, scale_factor, density_from_js(density)?);
    serialize(&list, "Failed to serialize display list")
}

/// Render an element to standalone SVG markup
#[wasm_bindgen(js_name = renderNotationSvg)]
pub fn render_notation_svg(element: JsValue, scale_factor: f64, density: JsValue) -> Result<String, JsValue> {
    let element = element_from_js(element)?;
    Ok(to_svg(&render(&element, scale_factor, density_from_js(density)?)))
}

/// Chord slots of a keyboard element, for hosts that lay out their own
/// chord UI
#[wasm_bindgen(js_name = chordSlots)]
pub fn chord_slots(element: JsValue) -> Result<JsValue, JsValue> {
    let element = element_from_js(element)?;
    let slots = match &element.body {
        NotationBody::Keyboard { notes, .. } => cluster_chord_slots(notes),
        NotationBody::Percussion { .. } => Vec::new(),
    };
    serialize(&slots, "Failed to serialize chord slots")
}

/// Default width of each measure for a new element
#[wasm_bindgen(js_name = defaultMeasureWidth)]
pub fn default_measure_width(dialect: &str, measure_count: u32) -> Result<f64, JsValue> {
    let dialect: Dialect = dialect_from_str(dialect)?;
    check_measure_count(measure_count).map_err(notation_error)?;
    Ok(dialect.default_measure_width(measure_count))
}

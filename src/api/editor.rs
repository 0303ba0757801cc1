//! JavaScript-facing editor session
//!
//! `NotationEditor` wraps one [`EditorSession`]. The host creates one per
//! open "add/edit notation" dialog, forwards pointer events in surface
//! pixels, redraws from `displayList()` after every call, and takes the
//! finished element from `save()`.

use wasm_bindgen::prelude::*;

use crate::editor::{EditorMode, EditorSession};
use crate::models::{Anchor, ChordQuality, ChordRoot, Duration, NotationElement};
use crate::renderers::to_svg;
use crate::{wasm_info, wasm_log, wasm_warn};
use super::helpers::{
    accidental_from_str, config_from_js, deserialize, dialect_from_str, notation_error, serialize, validation_error,
};

#[wasm_bindgen]
pub struct NotationEditor {
    session: EditorSession,
}

#[wasm_bindgen]
impl NotationEditor {
    /// Start the add-notation flow for a new element.
    ///
    /// `dialect` is "keyboard" or "percussion"; the anchor is in page
    /// percent. `config` may be undefined or a partial `EditorConfig`.
    #[wasm_bindgen(constructor)]
    pub fn new(dialect: &str, page_index: u32, anchor_x: f64, anchor_y: f64, config: JsValue) -> Result<NotationEditor, JsValue> {
        let dialect = dialect_from_str(dialect)?;
        let config = config_from_js(config)?;
        wasm_info!("NotationEditor: new {} element on page {}", dialect.name(), page_index);
        Ok(NotationEditor {
            session: EditorSession::new(dialect, page_index, Anchor::new(anchor_x, anchor_y), config),
        })
    }

    /// Open an editor on a previously saved element
    #[wasm_bindgen(js_name = openElement)]
    pub fn open_element(element: JsValue, config: JsValue) -> Result<NotationEditor, JsValue> {
        let element: NotationElement = deserialize(element, "Invalid notation element")?;
        let config = config_from_js(config)?;
        let session = EditorSession::open(element, config).map_err(notation_error)?;
        wasm_log!("NotationEditor: opened element with {} notes", session.element().map_or(0, |el| el.note_count()));
        Ok(NotationEditor { session })
    }

    /// Open an editor on an element given as JSON text
    #[wasm_bindgen(js_name = openElementJson)]
    pub fn open_element_json(json: &str, config: JsValue) -> Result<NotationEditor, JsValue> {
        let element = NotationElement::from_json(json).map_err(notation_error)?;
        let config = config_from_js(config)?;
        let session = EditorSession::open(element, config).map_err(notation_error)?;
        Ok(NotationEditor { session })
    }

    #[wasm_bindgen(js_name = chooseMeasureCount)]
    pub fn choose_measure_count(&mut self, measure_count: u32) -> Result<(), JsValue> {
        self.session.choose_measure_count(measure_count).map_err(notation_error)
    }

    /// "selectingMeasureCount", "editing" or "closed"
    pub fn mode(&self) -> String {
        match self.session.mode() {
            EditorMode::SelectingMeasureCount => "selectingMeasureCount",
            EditorMode::Editing => "editing",
            EditorMode::Closed => "closed",
        }
        .to_string()
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.session.pointer_down(x, y)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.session.pointer_move(x, y)
    }

    /// Returns true when the element changed
    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.session.pointer_up(x, y)
    }

    /// Pointer left the surface or the gesture was cancelled
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) -> bool {
        self.session.pointer_leave()
    }

    /// Same as `pointerLeave`, for `pointercancel` events
    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self) -> bool {
        self.session.pointer_leave()
    }

    // ------------------------------------------------------------------
    // Selection commands
    // ------------------------------------------------------------------

    pub fn selection(&self) -> Vec<u32> {
        self.session.selection().into_iter().map(|i| i as u32).collect()
    }

    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, indices: Vec<u32>) {
        let indices: Vec<usize> = indices.into_iter().map(|i| i as usize).collect();
        self.session.set_selection(&indices);
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    pub fn group(&mut self) -> bool {
        self.session.group()
    }

    pub fn ungroup(&mut self) -> bool {
        self.session.ungroup()
    }

    #[wasm_bindgen(js_name = deleteSelection)]
    pub fn delete_selection(&mut self) -> bool {
        self.session.delete()
    }

    /// `duration` is "whole", "half", "quarter", "eighth" or "sixteenth"
    #[wasm_bindgen(js_name = setSelectionDuration)]
    pub fn set_selection_duration(&mut self, duration: JsValue) -> Result<bool, JsValue> {
        let duration: Duration = deserialize(duration, "Invalid duration")?;
        Ok(self.session.set_selection_duration(duration))
    }

    #[wasm_bindgen(js_name = moveSelection)]
    pub fn move_selection(&mut self, delta_position: f64, pitch_steps: i32) -> bool {
        self.session.move_selection(delta_position, pitch_steps)
    }

    #[wasm_bindgen(js_name = toggleGhost)]
    pub fn toggle_ghost(&mut self) -> bool {
        self.session.toggle_ghost()
    }

    #[wasm_bindgen(js_name = setInputDuration)]
    pub fn set_input_duration(&mut self, duration: JsValue) -> Result<(), JsValue> {
        let duration: Duration = deserialize(duration, "Invalid duration")?;
        self.session.set_input_duration(duration);
        Ok(())
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&mut self, scale: f64) -> bool {
        self.session.set_scale(scale)
    }

    // ------------------------------------------------------------------
    // Chord picker
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = openChordPicker)]
    pub fn open_chord_picker(&mut self, slot_index: usize) -> bool {
        self.session.open_chord_picker(slot_index)
    }

    /// Current picker state, or null when closed
    #[wasm_bindgen(js_name = chordPicker)]
    pub fn chord_picker(&self) -> Result<JsValue, JsValue> {
        match self.session.picker() {
            Some(picker) => serialize(picker, "Failed to serialize chord picker"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = setPickerRoot)]
    pub fn set_picker_root(&mut self, letter: &str) -> Result<(), JsValue> {
        let root = ChordRoot::from_letter(letter)
            .ok_or_else(|| validation_error(format!("Unknown chord root: '{}'", letter)))?;
        if let Some(picker) = self.session.picker_mut() {
            picker.set_root(root);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setPickerAccidental)]
    pub fn set_picker_accidental(&mut self, symbol: &str) -> Result<(), JsValue> {
        let accidental = accidental_from_str(symbol)?;
        if let Some(picker) = self.session.picker_mut() {
            picker.set_accidental(accidental);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = setPickerQuality)]
    pub fn set_picker_quality(&mut self, suffix: &str) -> Result<(), JsValue> {
        let quality = ChordQuality::from_suffix(suffix)
            .ok_or_else(|| validation_error(format!("Unknown chord quality: '{}'", suffix)))?;
        if let Some(picker) = self.session.picker_mut() {
            picker.set_quality(quality);
        }
        Ok(())
    }

    #[wasm_bindgen(js_name = applyChord)]
    pub fn apply_chord(&mut self) -> bool {
        self.session.apply_chord()
    }

    #[wasm_bindgen(js_name = applyChordName)]
    pub fn apply_chord_name(&mut self, name: &str) -> bool {
        self.session.apply_chord_name(name)
    }

    #[wasm_bindgen(js_name = clearChord)]
    pub fn clear_chord(&mut self) -> bool {
        self.session.clear_chord()
    }

    #[wasm_bindgen(js_name = closeChordPicker)]
    pub fn close_chord_picker(&mut self) {
        self.session.close_picker();
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Committed draft, or null before a measure count is chosen
    pub fn element(&self) -> Result<JsValue, JsValue> {
        match self.session.element() {
            Some(element) => serialize(element, "Failed to serialize element"),
            None => Ok(JsValue::NULL),
        }
    }

    /// Editing presentation with selection, previews and hit regions
    #[wasm_bindgen(js_name = displayList)]
    pub fn display_list(&self) -> Result<JsValue, JsValue> {
        match self.session.display_list() {
            Some(list) => serialize(&list, "Failed to serialize display list"),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self) -> Option<String> {
        self.session.display_list().map(|list| to_svg(&list))
    }

    #[wasm_bindgen(js_name = canSave)]
    pub fn can_save(&self) -> bool {
        self.session.can_save()
    }

    /// Close the session and return the element, or null when it has no
    /// notes (the session then stays open)
    pub fn save(&mut self) -> Result<JsValue, JsValue> {
        match self.session.save() {
            Some(element) => {
                wasm_info!("NotationEditor: saved element {}", element.id);
                serialize(&element, "Failed to serialize element")
            }
            None => {
                wasm_warn!("NotationEditor: nothing to save");
                Ok(JsValue::NULL)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }
}

//! Editor session state machine
//!
//! One session edits one element. Pointer events arrive in surface pixels
//! of the editing presentation (scale 1.0); the session hit-tests against
//! the same display list it hands to the host, so what is drawn is what is
//! clicked.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::error::{NotationError, Result};
use crate::models::{
    check_measure_count, Anchor, Chord, Dialect, Duration, NotationBody, NotationElement, NoteType,
    PercussionNote, PercussionPart, Pitch, PitchNote,
};
use crate::placement::{can_place, chord_for_slot, cluster_chord_slots, is_valid_arrangement, locate_part, locate_pitch};
use crate::renderers::{note_heads, render_with_options, DisplayList, HitTarget, RenderDensity, RenderOptions, StaffLayout};
use crate::undo::UndoStack;
use super::chord_picker::ChordPicker;
use super::gesture::{Gesture, MeasureResize, Press};

/// Range accepted by [`EditorSession::set_scale`]
pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 4.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EditorMode {
    /// New element, waiting for the host to pick 1-4 measures
    SelectingMeasureCount,
    Editing,
    /// Saved or cancelled; the session no longer accepts edits
    Closed,
}

impl EditorMode {
    fn describe(self) -> &'static str {
        match self {
            EditorMode::SelectingMeasureCount => "selecting a measure count",
            EditorMode::Editing => "editing",
            EditorMode::Closed => "closed",
        }
    }
}

/// An open edit session
#[derive(Clone, Debug)]
pub struct EditorSession {
    config: EditorConfig,
    dialect: Dialect,
    page_index: u32,
    anchor: Anchor,
    mode: EditorMode,
    draft: Option<NotationElement>,
    selection: BTreeSet<usize>,
    gesture: Option<Gesture>,
    picker: Option<ChordPicker>,
    history: UndoStack,
    input_duration: Duration,
}

impl EditorSession {
    /// Start the add-notation flow for a new element
    pub fn new(dialect: Dialect, page_index: u32, anchor: Anchor, config: EditorConfig) -> Self {
        let history = UndoStack::new(NotationBody::empty(dialect), config.history_limit);
        Self {
            dialect,
            page_index,
            anchor: Anchor::new(anchor.x, anchor.y),
            mode: EditorMode::SelectingMeasureCount,
            draft: None,
            selection: BTreeSet::new(),
            gesture: None,
            picker: None,
            history,
            input_duration: config.default_duration,
            config,
        }
    }

    /// Open a session on an existing element. The element is loaded whole;
    /// nothing reaches the host unless the session is saved.
    pub fn open(mut element: NotationElement, config: EditorConfig) -> Result<Self> {
        element.normalize()?;
        let history = UndoStack::new(element.body.clone(), config.history_limit);
        log::debug!("editor: opened element {} ({} notes)", element.id, element.note_count());
        Ok(Self {
            dialect: element.dialect(),
            page_index: element.page_index,
            anchor: element.anchor,
            mode: EditorMode::Editing,
            draft: Some(element),
            selection: BTreeSet::new(),
            gesture: None,
            picker: None,
            history,
            input_duration: config.default_duration,
            config,
        })
    }

    /// Leave the measure-count step with an empty element of `measure_count`
    /// measures
    pub fn choose_measure_count(&mut self, measure_count: u32) -> Result<()> {
        if self.mode != EditorMode::SelectingMeasureCount {
            return Err(NotationError::WrongMode {
                operation: "chooseMeasureCount",
                mode: self.mode.describe(),
            });
        }
        check_measure_count(measure_count)?;
        let element = NotationElement::new_empty(self.dialect, self.page_index, self.anchor, measure_count)?;
        self.history.reset(element.body.clone());
        self.draft = Some(element);
        self.mode = EditorMode::Editing;
        log::debug!("editor: new {} element with {} measures", self.dialect.name(), measure_count);
        Ok(())
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The committed draft (no pending resize applied)
    pub fn element(&self) -> Option<&NotationElement> {
        self.draft.as_ref()
    }

    /// Selected note indices, ascending
    pub fn selection(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    pub fn picker(&self) -> Option<&ChordPicker> {
        self.picker.as_ref()
    }

    pub fn picker_mut(&mut self) -> Option<&mut ChordPicker> {
        self.picker.as_mut()
    }

    pub fn close_picker(&mut self) {
        self.picker = None;
    }

    pub fn input_duration(&self) -> Duration {
        self.input_duration
    }

    /// Duration used for notes inserted from now on
    pub fn set_input_duration(&mut self, duration: Duration) {
        self.input_duration = match self.dialect {
            Dialect::Keyboard => duration,
            Dialect::Percussion => duration.for_percussion(),
        };
    }

    pub fn can_undo(&self) -> bool {
        self.draft.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.draft.is_some() && self.history.can_redo()
    }

    // ------------------------------------------------------------------
    // Geometry and drawing
    // ------------------------------------------------------------------

    /// Draft with any live resize applied
    pub fn preview_element(&self) -> Option<NotationElement> {
        let mut element = self.draft.clone()?;
        if let Some(Gesture::Resize(resize)) = &self.gesture {
            element.measure_widths = resize.pending_widths.clone();
        }
        Some(element)
    }

    /// Layout of the committed draft on the editing surface
    pub fn layout(&self) -> Option<StaffLayout> {
        self.draft
            .as_ref()
            .map(|el| StaffLayout::for_element(el, 1.0, RenderDensity::Editing))
    }

    fn render_options(&self) -> RenderOptions {
        let drag_rect = match &self.gesture {
            Some(Gesture::Press(press)) if !press.is_click(self.config.click_threshold_px) => Some(press.rect()),
            _ => None,
        };
        RenderOptions {
            selection: self.selection.clone(),
            drag_rect,
            open_slot: self.picker.as_ref().map(|p| p.slot_index),
            note_hit_padding: self.config.note_hit_padding,
            handle_hit_half_width: self.config.handle_hit_half_width,
        }
    }

    /// Editing presentation of the draft, including live previews
    pub fn display_list(&self) -> Option<DisplayList> {
        let element = self.preview_element()?;
        Some(render_with_options(&element, 1.0, RenderDensity::Editing, &self.render_options()))
    }

    fn hit_test(&self, x: f64, y: f64) -> Option<HitTarget> {
        let element = self.draft.as_ref()?;
        render_with_options(element, 1.0, RenderDensity::Editing, &self.render_options()).hit_test(x, y)
    }

    // ------------------------------------------------------------------
    // Pointer gestures
    // ------------------------------------------------------------------

    /// Start a gesture. Returns false when the session is not editing.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let Some(element) = self.draft.as_ref() else { return false };
        if self.mode != EditorMode::Editing {
            return false;
        }
        let layout = StaffLayout::for_element(element, 1.0, RenderDensity::Editing);
        let half_width = self.config.handle_hit_half_width;
        // Boundary handles take precedence over notes sitting on a bar line
        let handle = (0..element.measure_widths.len()).find(|&measure| {
            layout
                .handle_rect(measure, half_width)
                .map_or(false, |rect| rect.contains(x, y))
        });
        let target = match handle {
            Some(measure) => Some(HitTarget::MeasureHandle { measure }),
            None => self.hit_test(x, y),
        };
        self.gesture = match target {
            Some(HitTarget::MeasureHandle { measure }) => {
                let total = element.total_width();
                let pixels_per_unit = if total > 0.0 { layout.staff_width / total } else { 1.0 };
                log::trace!("editor: resize measure {} from x={}", measure, x);
                Some(Gesture::Resize(MeasureResize::new(measure, x, &element.measure_widths, pixels_per_unit)))
            }
            _ => Some(Gesture::Press(Press::new(x, y, target))),
        };
        true
    }

    /// Update the live preview. Never mutates the draft.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        match &mut self.gesture {
            Some(Gesture::Press(press)) => press.current = (x, y),
            Some(Gesture::Resize(resize)) => resize.update(x, &self.config),
            None => {}
        }
    }

    /// Resolve the gesture. Returns true when the draft changed.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.pointer_move(x, y);
        match self.gesture.take() {
            Some(Gesture::Press(press)) => {
                if press.is_click(self.config.click_threshold_px) {
                    self.resolve_click(&press)
                } else {
                    self.select_rect(&press);
                    false
                }
            }
            Some(Gesture::Resize(resize)) => {
                if !resize.changed() {
                    return false;
                }
                match self.draft.as_mut() {
                    Some(element) => {
                        log::debug!("editor: measure {} resized to {}", resize.measure, resize.pending_widths[resize.measure]);
                        element.measure_widths = resize.pending_widths;
                        true
                    }
                    None => false,
                }
            }
            None => false,
        }
    }

    /// Pointer left the surface: drop whatever was in progress. Returns
    /// true when a gesture was discarded.
    pub fn pointer_leave(&mut self) -> bool {
        let discarded = self.gesture.take().is_some();
        if discarded {
            log::trace!("editor: gesture interrupted");
        }
        discarded
    }

    fn resolve_click(&mut self, press: &Press) -> bool {
        let (x, y) = press.start;
        match press.target {
            Some(HitTarget::Note { index }) => {
                if !self.selection.remove(&index) {
                    self.selection.insert(index);
                }
                self.picker = None;
                false
            }
            Some(HitTarget::ChordSlot { index }) => {
                self.open_chord_picker(index);
                false
            }
            _ => {
                if self.picker.take().is_some() {
                    return false;
                }
                if !self.selection.is_empty() {
                    self.selection.clear();
                    return false;
                }
                self.insert_at(x, y)
            }
        }
    }

    fn select_rect(&mut self, press: &Press) {
        let (Some(element), Some(layout)) = (self.draft.as_ref(), self.layout()) else { return };
        let rect = press.rect();
        self.selection = note_heads(element, &layout)
            .iter()
            .enumerate()
            .filter(|(_, (hx, hy))| rect.contains(*hx, *hy))
            .map(|(i, _)| i)
            .collect();
        self.picker = None;
        log::debug!("editor: rectangle selected {} notes", self.selection.len());
    }

    /// Map a click to a pitch or part and insert a note there
    fn insert_at(&mut self, x: f64, y: f64) -> bool {
        let Some(layout) = self.layout() else { return false };
        let position = layout.position_at(x);
        match self.dialect {
            Dialect::Keyboard => {
                let (top, bottom) = layout.pitch_span();
                self.insert_pitch_note(locate_pitch(y, top, bottom), position)
            }
            Dialect::Percussion => self.insert_percussion_note(locate_part(layout.step_at(y)), position),
        }
    }

    // ------------------------------------------------------------------
    // Mutations; each successful one records one history entry
    // ------------------------------------------------------------------

    fn record(&mut self, action: &str) {
        if let Some(element) = self.draft.as_ref() {
            self.history.push(element.body.clone());
            log::debug!("editor: {} ({} notes)", action, element.note_count());
        }
    }

    /// Add a keyboard note at the current input duration
    pub fn insert_pitch_note(&mut self, pitch: Pitch, position: f64) -> bool {
        let duration = self.input_duration;
        let Some(NotationBody::Keyboard { notes, .. }) = self.draft.as_mut().map(|el| &mut el.body) else {
            return false;
        };
        notes.push(PitchNote::new(pitch, position, duration));
        self.record("insert note");
        true
    }

    /// Add a percussion note unless it breaks the spacing rules, in which
    /// case nothing happens
    pub fn insert_percussion_note(&mut self, part: PercussionPart, position: f64) -> bool {
        let duration = self.input_duration;
        let Some(NotationBody::Percussion { notes }) = self.draft.as_mut().map(|el| &mut el.body) else {
            return false;
        };
        let note = PercussionNote::new(part, position, duration);
        if !can_place(notes, part, note.position) {
            log::debug!("editor: {} at {:.1} too close to another note, dropped", part, note.position);
            return false;
        }
        notes.push(note);
        self.record("insert note");
        true
    }

    /// Replace the selection
    pub fn set_selection(&mut self, indices: &[usize]) {
        let count = self.draft.as_ref().map_or(0, |el| el.note_count());
        self.selection = indices.iter().copied().filter(|&i| i < count).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Beam the selection together under a fresh id. Percussion selections
    /// containing a part that cannot beam are left alone.
    pub fn group(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let id = uuid::Uuid::new_v4().to_string();
        let selection = &self.selection;
        let Some(element) = self.draft.as_mut() else { return false };
        match &mut element.body {
            NotationBody::Keyboard { notes, .. } => {
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        note.beam_group = Some(id.clone());
                    }
                }
            }
            NotationBody::Percussion { notes } => {
                let all_beamable = selection
                    .iter()
                    .all(|&i| notes.get(i).map_or(false, |n| n.part.is_beamable()));
                if !all_beamable {
                    log::debug!("editor: selection has parts that cannot beam, not grouping");
                    return false;
                }
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        note.beam_group = Some(id.clone());
                    }
                }
            }
        }
        self.record("group");
        true
    }

    /// Clear the beam id of every selected note
    pub fn ungroup(&mut self) -> bool {
        let selection = &self.selection;
        let Some(element) = self.draft.as_mut() else { return false };
        let mut changed = false;
        match &mut element.body {
            NotationBody::Keyboard { notes, .. } => {
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        changed |= note.beam_group.take().is_some();
                    }
                }
            }
            NotationBody::Percussion { notes } => {
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        changed |= note.beam_group.take().is_some();
                    }
                }
            }
        }
        if changed {
            self.record("ungroup");
        }
        changed
    }

    /// Remove the selected notes, and the chord of any slot that loses all
    /// of its notes
    pub fn delete(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let selection = std::mem::take(&mut self.selection);
        let Some(element) = self.draft.as_mut() else { return false };
        match &mut element.body {
            NotationBody::Keyboard { notes, chords } => {
                let slots = cluster_chord_slots(notes);
                let (removed, kept): (Vec<_>, Vec<_>) = slots
                    .iter()
                    .partition(|s| s.note_indices.iter().all(|i| selection.contains(i)));
                let attached: &[Chord] = chords;
                let kept_chords: BTreeSet<usize> = kept
                    .iter()
                    .filter_map(|s| chord_for_slot(attached, s.position))
                    .collect();
                let dropped_chords: BTreeSet<usize> = removed
                    .iter()
                    .filter_map(|s| chord_for_slot(attached, s.position))
                    .filter(|c| !kept_chords.contains(c))
                    .collect();

                let mut index = 0;
                notes.retain(|_| {
                    let keep = !selection.contains(&index);
                    index += 1;
                    keep
                });
                let mut index = 0;
                chords.retain(|_| {
                    let keep = !dropped_chords.contains(&index);
                    index += 1;
                    keep
                });
            }
            NotationBody::Percussion { notes } => {
                let mut index = 0;
                notes.retain(|_| {
                    let keep = !selection.contains(&index);
                    index += 1;
                    keep
                });
            }
        }
        self.picker = None;
        self.record("delete");
        true
    }

    /// Give every selected note `duration`. Percussion only takes quarter
    /// and shorter values.
    pub fn set_selection_duration(&mut self, duration: Duration) -> bool {
        let selection = &self.selection;
        let Some(element) = self.draft.as_mut() else { return false };
        let mut changed = false;
        match &mut element.body {
            NotationBody::Keyboard { notes, .. } => {
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        changed |= note.duration != duration;
                        note.duration = duration;
                    }
                }
            }
            NotationBody::Percussion { notes } => {
                if !duration.is_percussion_value() {
                    return false;
                }
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        changed |= note.duration != duration;
                        note.duration = duration;
                    }
                }
            }
        }
        if changed {
            self.record("change duration");
        }
        changed
    }

    /// Shift the selection by `delta_position` units and, on the keyboard
    /// staff, by `pitch_steps` diatonic steps (positive is up). A percussion
    /// move that would break the spacing rules is refused as a whole.
    pub fn move_selection(&mut self, delta_position: f64, pitch_steps: i32) -> bool {
        if self.selection.is_empty() || !delta_position.is_finite() {
            return false;
        }
        let selection = &self.selection;
        let Some(element) = self.draft.as_mut() else { return false };
        let changed = match &mut element.body {
            NotationBody::Keyboard { notes, .. } => {
                let mut changed = false;
                for i in selection {
                    if let Some(note) = notes.get_mut(*i) {
                        let moved = PitchNote::new(note.pitch.shifted(pitch_steps), note.position + delta_position, note.duration);
                        changed |= moved.pitch != note.pitch || moved.position != note.position;
                        note.pitch = moved.pitch;
                        note.position = moved.position;
                    }
                }
                changed
            }
            NotationBody::Percussion { notes } => {
                let mut candidate = notes.clone();
                for i in selection {
                    if let Some(note) = candidate.get_mut(*i) {
                        note.position = crate::models::clamp_position(note.position + delta_position);
                    }
                }
                if !is_valid_arrangement(&candidate) {
                    log::debug!("editor: move would crowd notes, refused");
                    return false;
                }
                let changed = candidate != *notes;
                *notes = candidate;
                changed
            }
        };
        if changed {
            self.record("move");
        }
        changed
    }

    /// Flip selected drum notes between normal and ghost
    pub fn toggle_ghost(&mut self) -> bool {
        let selection = &self.selection;
        let Some(NotationBody::Percussion { notes }) = self.draft.as_mut().map(|el| &mut el.body) else {
            return false;
        };
        let mut changed = false;
        for i in selection {
            if let Some(note) = notes.get_mut(*i) {
                if !note.part.allows_ghost() {
                    continue;
                }
                note.note_type = match note.note_type {
                    NoteType::Ghost => NoteType::Normal,
                    _ => NoteType::Ghost,
                };
                changed = true;
            }
        }
        if changed {
            self.record("toggle ghost");
        }
        changed
    }

    /// Set the on-page size of a keyboard element. Not versioned.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        let Some(element) = self.draft.as_mut() else { return false };
        if element.dialect() != Dialect::Keyboard || !scale.is_finite() {
            return false;
        }
        element.scale = Some(scale.clamp(MIN_SCALE, MAX_SCALE));
        true
    }

    // ------------------------------------------------------------------
    // Chords
    // ------------------------------------------------------------------

    /// Open the picker on the `slot_index`-th chord slot
    pub fn open_chord_picker(&mut self, slot_index: usize) -> bool {
        let Some(NotationBody::Keyboard { notes, chords }) = self.draft.as_ref().map(|el| &el.body) else {
            return false;
        };
        let Some(slot) = cluster_chord_slots(notes).into_iter().nth(slot_index) else {
            return false;
        };
        self.picker = Some(ChordPicker::open(slot_index, slot.position, chords));
        true
    }

    /// Attach the picker's chord to its slot
    pub fn apply_chord(&mut self) -> bool {
        match self.picker.as_ref().and_then(|p| p.name()) {
            Some(name) => self.apply_chord_name(&name),
            None => false,
        }
    }

    /// Attach a free-form chord name to the open picker's slot, replacing
    /// the chord already there
    pub fn apply_chord_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(position) = self.picker.as_ref().map(|p| p.slot_position) else { return false };
        let Some(NotationBody::Keyboard { chords, .. }) = self.draft.as_mut().map(|el| &mut el.body) else {
            return false;
        };
        match chord_for_slot(chords, position) {
            Some(i) => chords[i] = Chord::new(name, position),
            None => chords.push(Chord::new(name, position)),
        }
        self.picker = None;
        self.record("set chord");
        true
    }

    /// Remove the chord attached to the open picker's slot
    pub fn clear_chord(&mut self) -> bool {
        let Some(position) = self.picker.take().map(|p| p.slot_position) else { return false };
        let Some(NotationBody::Keyboard { chords, .. }) = self.draft.as_mut().map(|el| &mut el.body) else {
            return false;
        };
        let Some(i) = chord_for_slot(chords, position) else { return false };
        chords.remove(i);
        self.record("clear chord");
        true
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    fn restore(&mut self, snapshot: Option<NotationBody>) -> bool {
        let (Some(snapshot), Some(element)) = (snapshot, self.draft.as_mut()) else { return false };
        element.body = snapshot;
        self.selection.clear();
        self.picker = None;
        self.gesture = None;
        true
    }

    /// Step back one edit; notes and chords only
    pub fn undo(&mut self) -> bool {
        if self.draft.is_none() {
            return false;
        }
        let snapshot = self.history.undo().cloned();
        let restored = self.restore(snapshot);
        if restored {
            log::debug!("editor: undo ({} left)", self.history.undo_count());
        }
        restored
    }

    pub fn redo(&mut self) -> bool {
        if self.draft.is_none() {
            return false;
        }
        let snapshot = self.history.redo().cloned();
        let restored = self.restore(snapshot);
        if restored {
            log::debug!("editor: redo ({} left)", self.history.redo_count());
        }
        restored
    }

    // ------------------------------------------------------------------
    // Session close
    // ------------------------------------------------------------------

    /// An element with no notes cannot be saved
    pub fn can_save(&self) -> bool {
        self.mode == EditorMode::Editing && self.draft.as_ref().map_or(false, |el| !el.is_empty())
    }

    /// Close the session and hand the element over. Returns None, and
    /// stays open, when there is nothing to save.
    pub fn save(&mut self) -> Option<NotationElement> {
        if !self.can_save() {
            return None;
        }
        self.gesture = None;
        self.picker = None;
        self.selection.clear();
        self.mode = EditorMode::Closed;
        let element = self.draft.take()?;
        log::debug!("editor: saved element {} ({} notes)", element.id, element.note_count());
        Some(element)
    }

    /// Discard the draft unconditionally
    pub fn cancel(&mut self) {
        self.draft = None;
        self.gesture = None;
        self.picker = None;
        self.selection.clear();
        self.history.reset(NotationBody::empty(self.dialect));
        self.mode = EditorMode::Closed;
        log::debug!("editor: cancelled");
    }
}

//! Chord picker state for one chord slot

use serde::{Deserialize, Serialize};
use crate::models::{Chord, ChordAccidental, ChordQuality, ChordRoot, ChordSpelling};
use crate::placement::chord_for_slot;

/// Open picker: which slot it edits and the fields picked so far
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChordPicker {
    pub slot_index: usize,
    pub slot_position: f64,
    pub spelling: ChordSpelling,

    /// Name currently attached to the slot, if any
    pub current_name: Option<String>,
}

impl ChordPicker {
    /// Open on a slot, prefilled from the chord already attached to it
    pub fn open(slot_index: usize, slot_position: f64, chords: &[Chord]) -> Self {
        let current_name = chord_for_slot(chords, slot_position).map(|i| chords[i].name.clone());
        let spelling = current_name
            .as_deref()
            .and_then(ChordSpelling::parse)
            .unwrap_or_default();
        Self {
            slot_index,
            slot_position,
            spelling,
            current_name,
        }
    }

    pub fn set_root(&mut self, root: ChordRoot) {
        self.spelling.root = Some(root);
    }

    pub fn set_accidental(&mut self, accidental: ChordAccidental) {
        self.spelling.accidental = accidental;
    }

    pub fn set_quality(&mut self, quality: ChordQuality) {
        self.spelling.quality = quality;
    }

    /// Name the picker would apply, None until a root is chosen
    pub fn name(&self) -> Option<String> {
        self.spelling.name()
    }
}

//! Percussion placement rules
//!
//! Two notes of the same part may not sit closer than
//! [`MIN_NOTE_DISTANCE`], and neither may a cymbal-type note and a hi-hat
//! note, since they share the upper lanes and their heads would collide.
//! Keyboard notes have no such rule.

use crate::models::{PercussionNote, PercussionPart};

/// Minimum horizontal distance between conflicting percussion notes
pub const MIN_NOTE_DISTANCE: f64 = 4.0;

/// Whether two parts compete for the same horizontal space
pub fn parts_conflict(a: PercussionPart, b: PercussionPart) -> bool {
    a == b
        || (a.is_cymbal() && b == PercussionPart::HiHat)
        || (b.is_cymbal() && a == PercussionPart::HiHat)
}

fn too_close(a: f64, b: f64) -> bool {
    (a - b).abs() < MIN_NOTE_DISTANCE
}

/// Whether a note of `part` may be inserted at `position`
pub fn can_place(notes: &[PercussionNote], part: PercussionPart, position: f64) -> bool {
    !notes
        .iter()
        .any(|n| parts_conflict(n.part, part) && too_close(n.position, position))
}

/// Whether a whole note set satisfies the placement rules
pub fn is_valid_arrangement(notes: &[PercussionNote]) -> bool {
    notes.iter().enumerate().all(|(i, a)| {
        notes[i + 1..]
            .iter()
            .all(|b| !(parts_conflict(a.part, b.part) && too_close(a.position, b.position)))
    })
}

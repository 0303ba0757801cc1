//! Placement and clustering engine
//!
//! Pure functions that map pointer coordinates onto parts, pitches and
//! positions, enforce the percussion spacing rules, and group keyboard
//! notes into chord slots.

pub mod locate;
pub mod validation;
pub mod clustering;

pub use locate::{locate_part, locate_pitch, position_from_x, POSITION_MARGIN};
pub use validation::{can_place, is_valid_arrangement, parts_conflict, MIN_NOTE_DISTANCE};
pub use clustering::{chord_for_slot, cluster_chord_slots, orphan_chords, ChordSlot, CLUSTER_THRESHOLD};

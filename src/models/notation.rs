//! Notes, chords and durations
//!
//! Positions are resolution independent: 0..=100 across the combined width
//! of all measures of an element.

use serde::{Deserialize, Serialize};
use super::percussion::{NoteType, PercussionPart};
use super::pitch::Pitch;

/// Lowest and highest horizontal position
pub const POSITION_MIN: f64 = 0.0;
pub const POSITION_MAX: f64 = 100.0;

/// Clamp a horizontal position into [0, 100]. NaN collapses to 0.
pub fn clamp_position(position: f64) -> f64 {
    if position.is_nan() {
        return POSITION_MIN;
    }
    position.clamp(POSITION_MIN, POSITION_MAX)
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[serde(rename_all = "camelCase")]
pub enum Duration {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
}

impl Duration {
    /// Number of flags (or beams) the value carries
    pub fn flag_count(self) -> usize {
        match self {
            Duration::Eighth => 1,
            Duration::Sixteenth => 2,
            _ => 0,
        }
    }

    pub fn has_stem(self) -> bool {
        self != Duration::Whole
    }

    /// Quarter and shorter values get a filled head
    pub fn is_filled(self) -> bool {
        self >= Duration::Quarter
    }

    /// Percussion notes are quarter, eighth or sixteenth only
    pub fn is_percussion_value(self) -> bool {
        self >= Duration::Quarter
    }

    /// Closest value the percussion dialect accepts
    pub fn for_percussion(self) -> Duration {
        if self.is_percussion_value() {
            self
        } else {
            Duration::Quarter
        }
    }
}

/// Opaque beam identifier; notes sharing one are drawn beamed together
pub type BeamGroupId = String;

/// A keyboard note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PitchNote {
    pub pitch: Pitch,

    /// Horizontal placement, 0..=100
    pub position: f64,

    pub duration: Duration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam_group: Option<BeamGroupId>,
}

impl PitchNote {
    pub fn new(pitch: Pitch, position: f64, duration: Duration) -> Self {
        Self {
            pitch,
            position: clamp_position(position),
            duration,
            beam_group: None,
        }
    }
}

/// A percussion note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PercussionNote {
    pub part: PercussionPart,

    /// Horizontal placement, 0..=100
    pub position: f64,

    pub duration: Duration,

    /// Derived from `part` at creation; kept for rendering
    #[serde(default)]
    pub note_type: NoteType,

    /// Ignored at render time unless `part` is beamable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam_group: Option<BeamGroupId>,
}

impl PercussionNote {
    pub fn new(part: PercussionPart, position: f64, duration: Duration) -> Self {
        Self {
            part,
            position: clamp_position(position),
            duration: duration.for_percussion(),
            note_type: part.default_note_type(),
            beam_group: None,
        }
    }

    /// Beam id honoured at render time (None for non-beamable parts)
    pub fn effective_beam_group(&self) -> Option<&str> {
        if self.part.is_beamable() {
            self.beam_group.as_deref()
        } else {
            None
        }
    }
}

/// A chord label above the keyboard staff.
///
/// Chords are bound to notes only by proximity of `position`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub name: String,
    pub position: f64,
}

impl Chord {
    pub fn new(name: impl Into<String>, position: f64) -> Self {
        Self {
            name: name.into(),
            position: clamp_position(position),
        }
    }
}

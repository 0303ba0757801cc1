//! Percussion parts and their fixed lookup tables
//!
//! Each part owns one lane on a five-line staff. The tables here (vertical
//! position, default stem direction, note-head style, beamability) are
//! immutable and answered by `match`, so there is nothing to initialise.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight percussion lanes.
///
/// Declaration order is the lookup order used when a pointer position is
/// equally close to two lanes: the part declared first wins.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PercussionPart {
    /// Crash cymbal
    #[serde(rename = "CY")]
    Crash,
    /// Ride cymbal
    #[serde(rename = "RD")]
    Ride,
    #[serde(rename = "HH")]
    HiHat,
    #[serde(rename = "T1")]
    HighTom,
    #[serde(rename = "SN")]
    Snare,
    #[serde(rename = "T2")]
    MidTom,
    #[serde(rename = "FT")]
    FloorTom,
    /// Bass drum
    #[serde(rename = "BD")]
    Kick,
}

/// All parts in lookup order
pub const PERCUSSION_PARTS: [PercussionPart; 8] = [
    PercussionPart::Crash,
    PercussionPart::Ride,
    PercussionPart::HiHat,
    PercussionPart::HighTom,
    PercussionPart::Snare,
    PercussionPart::MidTom,
    PercussionPart::FloorTom,
    PercussionPart::Kick,
];

/// Stored note-head kind of a percussion note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum NoteType {
    #[default]
    Normal,
    Cross,
    Ghost,
}

/// Glyph actually drawn for a note head
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum NoteHeadStyle {
    /// Filled ellipse
    Filled,
    /// Hollow ellipse (half and whole notes)
    Hollow,
    /// "X"
    Cross,
    /// "X" inside a circle
    RingedCross,
    /// Filled ellipse wrapped in parentheses
    Ghost,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StemDirection {
    Up,
    Down,
}

impl StemDirection {
    pub fn opposite(self) -> Self {
        match self {
            StemDirection::Up => StemDirection::Down,
            StemDirection::Down => StemDirection::Up,
        }
    }
}

impl PercussionPart {
    /// Two-letter code used in serialized elements
    pub fn code(self) -> &'static str {
        match self {
            PercussionPart::Crash => "CY",
            PercussionPart::Ride => "RD",
            PercussionPart::HiHat => "HH",
            PercussionPart::HighTom => "T1",
            PercussionPart::Snare => "SN",
            PercussionPart::MidTom => "T2",
            PercussionPart::FloorTom => "FT",
            PercussionPart::Kick => "BD",
        }
    }

    pub fn from_code(code: &str) -> Option<PercussionPart> {
        PERCUSSION_PARTS
            .iter()
            .copied()
            .find(|p| p.code().eq_ignore_ascii_case(code))
    }

    /// Vertical lane in staff steps (half line-spacings) below the top line
    pub fn staff_step(self) -> i32 {
        match self {
            PercussionPart::Crash => -2,
            PercussionPart::Ride => 0,
            PercussionPart::HiHat => -1,
            PercussionPart::HighTom => 1,
            PercussionPart::Snare => 3,
            PercussionPart::MidTom => 2,
            PercussionPart::FloorTom => 5,
            PercussionPart::Kick => 7,
        }
    }

    /// Stem direction of an unbeamed note of this part
    pub fn default_stem(self) -> StemDirection {
        match self {
            PercussionPart::Kick => StemDirection::Down,
            _ => StemDirection::Up,
        }
    }

    /// Cymbal-type parts share the upper lane area with the hi-hat
    pub fn is_cymbal(self) -> bool {
        matches!(self, PercussionPart::Crash | PercussionPart::Ride)
    }

    /// Only the hi-hat and the snare are ever drawn beamed
    pub fn is_beamable(self) -> bool {
        matches!(self, PercussionPart::HiHat | PercussionPart::Snare)
    }

    /// Note type a freshly placed note of this part gets
    pub fn default_note_type(self) -> NoteType {
        match self {
            PercussionPart::Crash | PercussionPart::Ride | PercussionPart::HiHat => NoteType::Cross,
            _ => NoteType::Normal,
        }
    }

    /// Drum parts may be played as ghost notes; cymbals and hi-hat may not
    pub fn allows_ghost(self) -> bool {
        self.default_note_type() == NoteType::Normal
    }

    /// Note-head glyph for a note of this part with the given stored type
    pub fn head_style(self, note_type: NoteType) -> NoteHeadStyle {
        match (self, note_type) {
            (PercussionPart::Crash, _) => NoteHeadStyle::RingedCross,
            (_, NoteType::Cross) => NoteHeadStyle::Cross,
            (_, NoteType::Ghost) if self.allows_ghost() => NoteHeadStyle::Ghost,
            _ if !self.allows_ghost() => NoteHeadStyle::Cross,
            _ => NoteHeadStyle::Filled,
        }
    }
}

impl fmt::Display for PercussionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

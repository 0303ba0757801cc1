//! Keyboard pitch positions
//!
//! The keyboard dialect only knows the fifteen natural staff positions
//! between C4 (one ledger line below the treble staff) and C6 (two ledger
//! lines above it). A pitch is a vertical slot on the staff, nothing more:
//! there are no accidentals on notes and no key signature.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One of the fifteen staff positions, ordered from lowest to highest
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pitch {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
    D5,
    E5,
    F5,
    G5,
    A5,
    B5,
    C6,
}

/// Every pitch, from highest to lowest.
///
/// This is the order of the vertical bands used when a pointer position
/// is mapped to a pitch: band 0 sits at the top of the staff area.
pub const PITCHES_TOP_DOWN: [Pitch; 15] = [
    Pitch::C6,
    Pitch::B5,
    Pitch::A5,
    Pitch::G5,
    Pitch::F5,
    Pitch::E5,
    Pitch::D5,
    Pitch::C5,
    Pitch::B4,
    Pitch::A4,
    Pitch::G4,
    Pitch::F4,
    Pitch::E4,
    Pitch::D4,
    Pitch::C4,
];

static PITCH_BY_NAME: Lazy<HashMap<&'static str, Pitch>> = Lazy::new(|| {
    PITCHES_TOP_DOWN
        .iter()
        .map(|&p| (p.name(), p))
        .collect()
});

/// Staff step of the middle line (B4), counted in half-spaces from the top line
pub const MIDDLE_LINE_STEP: i32 = 4;

impl Pitch {
    /// Name as used in serialized elements ("C4", "F5", ...)
    pub fn name(self) -> &'static str {
        match self {
            Pitch::C4 => "C4",
            Pitch::D4 => "D4",
            Pitch::E4 => "E4",
            Pitch::F4 => "F4",
            Pitch::G4 => "G4",
            Pitch::A4 => "A4",
            Pitch::B4 => "B4",
            Pitch::C5 => "C5",
            Pitch::D5 => "D5",
            Pitch::E5 => "E5",
            Pitch::F5 => "F5",
            Pitch::G5 => "G5",
            Pitch::A5 => "A5",
            Pitch::B5 => "B5",
            Pitch::C6 => "C6",
        }
    }

    /// Look up a pitch by its name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Pitch> {
        PITCH_BY_NAME.get(name.to_ascii_uppercase().as_str()).copied()
    }

    /// Index into [`PITCHES_TOP_DOWN`]
    pub fn band_index(self) -> usize {
        14 - self as usize
    }

    /// Pitch for a band index, clamped into the valid range
    pub fn from_band_index(index: i64) -> Pitch {
        PITCHES_TOP_DOWN[index.clamp(0, 14) as usize]
    }

    /// Vertical position in staff steps (half line-spacings) below the top
    /// staff line. F5 (top line) is 0, E4 (bottom line) is 8, C4 is 10 and
    /// C6 is -4.
    pub fn staff_step(self) -> i32 {
        self.band_index() as i32 - 4
    }

    /// Move the pitch by `steps` diatonic steps (positive is up), clamped
    /// to the C4..C6 range.
    pub fn shifted(self, steps: i32) -> Pitch {
        Pitch::from_band_index(self.band_index() as i64 - steps as i64)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

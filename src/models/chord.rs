//! Chord label parts offered by the chord picker
//!
//! A chord name is `root + accidental + quality`, e.g. `C`, `F#m7`,
//! `Bbmaj7`. Names typed elsewhere are free-form and are kept as-is; parsing
//! only serves to prefill the picker.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChordRoot {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

pub const CHORD_ROOTS: [ChordRoot; 7] = [
    ChordRoot::C,
    ChordRoot::D,
    ChordRoot::E,
    ChordRoot::F,
    ChordRoot::G,
    ChordRoot::A,
    ChordRoot::B,
];

impl ChordRoot {
    pub fn letter(self) -> &'static str {
        match self {
            ChordRoot::C => "C",
            ChordRoot::D => "D",
            ChordRoot::E => "E",
            ChordRoot::F => "F",
            ChordRoot::G => "G",
            ChordRoot::A => "A",
            ChordRoot::B => "B",
        }
    }

    pub fn from_letter(letter: &str) -> Option<ChordRoot> {
        CHORD_ROOTS.iter().copied().find(|r| r.letter() == letter)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChordAccidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl ChordAccidental {
    pub fn symbol(self) -> &'static str {
        match self {
            ChordAccidental::Natural => "",
            ChordAccidental::Sharp => "#",
            ChordAccidental::Flat => "b",
        }
    }
}

/// Chord qualities in picker order
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    HalfDiminished,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    Sixth,
    Add9,
}

pub const CHORD_QUALITIES: [ChordQuality; 12] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Dominant7,
    ChordQuality::Major7,
    ChordQuality::Minor7,
    ChordQuality::HalfDiminished,
    ChordQuality::Diminished,
    ChordQuality::Augmented,
    ChordQuality::Sus2,
    ChordQuality::Sus4,
    ChordQuality::Sixth,
    ChordQuality::Add9,
];

impl ChordQuality {
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::HalfDiminished => "m7b5",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Sixth => "6",
            ChordQuality::Add9 => "add9",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<ChordQuality> {
        CHORD_QUALITIES.iter().copied().find(|q| q.suffix() == suffix)
    }
}

/// A chord name broken into picker fields
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChordSpelling {
    pub root: Option<ChordRoot>,
    pub accidental: ChordAccidental,
    pub quality: ChordQuality,
}

static CHORD_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-G])([#b]?)(.*)$").expect("chord name pattern is valid")
});

impl ChordSpelling {
    pub fn new(root: ChordRoot, accidental: ChordAccidental, quality: ChordQuality) -> Self {
        Self {
            root: Some(root),
            accidental,
            quality,
        }
    }

    /// Label text, or None while no root has been picked
    pub fn name(&self) -> Option<String> {
        let root = self.root?;
        Some(format!(
            "{}{}{}",
            root.letter(),
            self.accidental.symbol(),
            self.quality.suffix()
        ))
    }

    /// Split a chord name into picker fields. Returns None for names the
    /// picker cannot express.
    pub fn parse(name: &str) -> Option<ChordSpelling> {
        let caps = CHORD_NAME.captures(name.trim())?;
        let root = ChordRoot::from_letter(&caps[1])?;
        let accidental = match &caps[2] {
            "#" => ChordAccidental::Sharp,
            "b" => ChordAccidental::Flat,
            _ => ChordAccidental::Natural,
        };
        let quality = ChordQuality::from_suffix(&caps[3])?;
        Some(ChordSpelling::new(root, accidental, quality))
    }
}

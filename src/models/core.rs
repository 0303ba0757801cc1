//! Notation element: one placed fragment of 1-4 measures
//!
//! This is the value exchanged with the host. It holds no editor state;
//! the host stores it as part of its per-page annotation record.

use serde::{Deserialize, Serialize};
use crate::error::{NotationError, Result};
use super::notation::{clamp_position, Chord, PercussionNote, PitchNote};

pub const MIN_MEASURE_COUNT: u32 = 1;
pub const MAX_MEASURE_COUNT: u32 = 4;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Dialect {
    Keyboard,
    Percussion,
}

impl Dialect {
    /// Default width (layout units) of each measure for a fresh element
    pub fn default_measure_width(self, measure_count: u32) -> f64 {
        match (self, measure_count) {
            (Dialect::Keyboard, 1) => 320.0,
            (Dialect::Keyboard, 2) => 220.0,
            (Dialect::Keyboard, 3) => 170.0,
            (Dialect::Keyboard, _) => 140.0,
            (Dialect::Percussion, 1) => 360.0,
            (Dialect::Percussion, 2) => 250.0,
            (Dialect::Percussion, 3) => 190.0,
            (Dialect::Percussion, _) => 160.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Keyboard => "keyboard",
            Dialect::Percussion => "percussion",
        }
    }

    pub fn from_name(name: &str) -> Option<Dialect> {
        match name.to_ascii_lowercase().as_str() {
            "keyboard" | "piano" => Some(Dialect::Keyboard),
            "percussion" | "drums" => Some(Dialect::Percussion),
            _ => None,
        }
    }
}

/// Page-relative placement point, percent of page width/height
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

impl Anchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_position(x),
            y: clamp_position(y),
        }
    }
}

/// Dialect-specific content of an element.
///
/// This is also the unit of undo history: only notes and chords are
/// versioned, never measure geometry or scale.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "dialect", rename_all = "camelCase")]
pub enum NotationBody {
    Keyboard {
        notes: Vec<PitchNote>,
        #[serde(default)]
        chords: Vec<Chord>,
    },
    Percussion {
        notes: Vec<PercussionNote>,
    },
}

impl NotationBody {
    pub fn empty(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Keyboard => NotationBody::Keyboard {
                notes: Vec::new(),
                chords: Vec::new(),
            },
            Dialect::Percussion => NotationBody::Percussion { notes: Vec::new() },
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            NotationBody::Keyboard { .. } => Dialect::Keyboard,
            NotationBody::Percussion { .. } => Dialect::Percussion,
        }
    }

    pub fn note_count(&self) -> usize {
        match self {
            NotationBody::Keyboard { notes, .. } => notes.len(),
            NotationBody::Percussion { notes } => notes.len(),
        }
    }

    /// Horizontal position of the note at `index`
    pub fn note_position(&self, index: usize) -> Option<f64> {
        match self {
            NotationBody::Keyboard { notes, .. } => notes.get(index).map(|n| n.position),
            NotationBody::Percussion { notes } => notes.get(index).map(|n| n.position),
        }
    }

    pub fn chords(&self) -> &[Chord] {
        match self {
            NotationBody::Keyboard { chords, .. } => chords,
            NotationBody::Percussion { .. } => &[],
        }
    }

    fn clamp_positions(&mut self) {
        match self {
            NotationBody::Keyboard { notes, chords } => {
                notes.iter_mut().for_each(|n| n.position = clamp_position(n.position));
                chords.iter_mut().for_each(|c| c.position = clamp_position(c.position));
            }
            NotationBody::Percussion { notes } => {
                notes.iter_mut().for_each(|n| n.position = clamp_position(n.position));
            }
        }
    }
}

/// One notation fragment placed on a page
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotationElement {
    /// Opaque id, unique within a page
    pub id: String,

    pub anchor: Anchor,

    pub page_index: u32,

    pub measure_count: u32,

    /// One width per measure, in layout units
    pub measure_widths: Vec<f64>,

    /// On-page size multiplier (keyboard only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,

    #[serde(flatten)]
    pub body: NotationBody,
}

impl NotationElement {
    /// Create an empty element with default measure widths
    pub fn new_empty(
        dialect: Dialect,
        page_index: u32,
        anchor: Anchor,
        measure_count: u32,
    ) -> Result<Self> {
        check_measure_count(measure_count)?;
        let width = dialect.default_measure_width(measure_count);
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            anchor,
            page_index,
            measure_count,
            measure_widths: vec![width; measure_count as usize],
            scale: match dialect {
                Dialect::Keyboard => Some(1.0),
                Dialect::Percussion => None,
            },
            body: NotationBody::empty(dialect),
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.body.dialect()
    }

    pub fn note_count(&self) -> usize {
        self.body.note_count()
    }

    pub fn is_empty(&self) -> bool {
        self.note_count() == 0
    }

    /// Sum of all measure widths
    pub fn total_width(&self) -> f64 {
        self.measure_widths.iter().sum()
    }

    /// Render multiplier for on-page display; always 1.0 for percussion
    pub fn effective_scale(&self) -> f64 {
        match self.dialect() {
            Dialect::Keyboard => self.scale.filter(|s| *s > 0.0).unwrap_or(1.0),
            Dialect::Percussion => 1.0,
        }
    }

    /// Repair a loaded element so every invariant holds.
    ///
    /// The measure count must already be valid; widths are padded or cut to
    /// match it, non-positive widths fall back to the default, and positions
    /// are clamped.
    pub fn normalize(&mut self) -> Result<()> {
        check_measure_count(self.measure_count)?;
        let default_width = self.dialect().default_measure_width(self.measure_count);
        if self.measure_widths.len() != self.measure_count as usize {
            log::warn!(
                "element {}: {} measure widths for {} measures, repairing",
                self.id,
                self.measure_widths.len(),
                self.measure_count
            );
            self.measure_widths.resize(self.measure_count as usize, default_width);
        }
        for w in self.measure_widths.iter_mut() {
            if !(w.is_finite() && *w > 0.0) {
                *w = default_width;
            }
        }
        if self.dialect() == Dialect::Percussion {
            self.scale = None;
        }
        self.anchor = Anchor::new(self.anchor.x, self.anchor.y);
        self.body.clamp_positions();
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and normalize an element previously produced by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> Result<Self> {
        let mut element: NotationElement = serde_json::from_str(json)?;
        element.normalize()?;
        Ok(element)
    }
}

pub fn check_measure_count(measure_count: u32) -> Result<()> {
    if (MIN_MEASURE_COUNT..=MAX_MEASURE_COUNT).contains(&measure_count) {
        Ok(())
    } else {
        Err(NotationError::InvalidMeasureCount(measure_count))
    }
}

//! In-progress pointer gestures
//!
//! Gestures are transient view state. Nothing here touches the draft until
//! the session commits it on pointer-up.

use crate::config::EditorConfig;
use crate::renderers::{HitTarget, Rect};

/// A press that will become either a click or a rectangle selection
#[derive(Clone, Debug, PartialEq)]
pub struct Press {
    pub start: (f64, f64),
    pub current: (f64, f64),

    /// What was under the pointer when it went down
    pub target: Option<HitTarget>,
}

impl Press {
    pub fn new(x: f64, y: f64, target: Option<HitTarget>) -> Self {
        Self {
            start: (x, y),
            current: (x, y),
            target,
        }
    }

    /// Straight-line pointer travel since the press began
    pub fn distance(&self) -> f64 {
        let dx = self.current.0 - self.start.0;
        let dy = self.current.1 - self.start.1;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_click(&self, threshold: f64) -> bool {
        self.distance() < threshold
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.start, self.current)
    }
}

/// Live resize of one measure.
///
/// The pending widths are only a preview; the session copies them into the
/// draft when the pointer is released and drops them if it leaves.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureResize {
    pub measure: usize,
    pub start_x: f64,
    pub start_widths: Vec<f64>,
    pub pending_widths: Vec<f64>,

    /// Surface pixels per measure-width unit
    pixels_per_unit: f64,
}

impl MeasureResize {
    pub fn new(measure: usize, start_x: f64, widths: &[f64], pixels_per_unit: f64) -> Self {
        Self {
            measure,
            start_x,
            start_widths: widths.to_vec(),
            pending_widths: widths.to_vec(),
            pixels_per_unit: if pixels_per_unit > 0.0 { pixels_per_unit } else { 1.0 },
        }
    }

    /// Follow the pointer; the dragged measure saturates at the configured
    /// bounds and every other measure keeps its width.
    pub fn update(&mut self, x: f64, config: &EditorConfig) {
        let Some(&start) = self.start_widths.get(self.measure) else { return };
        let delta = (x - self.start_x) / self.pixels_per_unit;
        self.pending_widths[self.measure] = config.clamp_measure_width(start + delta);
    }

    pub fn changed(&self) -> bool {
        self.pending_widths != self.start_widths
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Press(Press),
    Resize(MeasureResize),
}

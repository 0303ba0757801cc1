//! Staff geometry shared by the renderer and the editor
//!
//! The editor hit-tests against exactly the geometry the renderer draws
//! with, so every coordinate conversion lives here.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use crate::models::{Dialect, NotationElement, PercussionPart, Pitch};
use crate::placement::position_from_x;

/// Presentation size of a rendered element
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderDensity {
    /// Small, non-interactive, embedded at natural page scale
    Compact = 0,
    /// Large, interactive, used while editing
    Editing = 1,
}

impl RenderDensity {
    /// Distance between staff lines at scale 1.0
    fn line_spacing(self) -> f64 {
        match self {
            RenderDensity::Compact => 6.0,
            RenderDensity::Editing => 12.0,
        }
    }

    /// Pixels per measure-width unit at scale 1.0
    fn width_factor(self) -> f64 {
        match self {
            RenderDensity::Compact => 0.5,
            RenderDensity::Editing => 1.0,
        }
    }

    fn padding(self) -> f64 {
        match self {
            RenderDensity::Compact => 4.0,
            RenderDensity::Editing => 24.0,
        }
    }

    fn chord_band_height(self) -> f64 {
        match self {
            RenderDensity::Compact => 12.0,
            RenderDensity::Editing => 30.0,
        }
    }

    pub fn font_size(self) -> f64 {
        match self {
            RenderDensity::Compact => 9.0,
            RenderDensity::Editing => 15.0,
        }
    }

    /// Interactive extras: empty chord slots, hit regions, resize handles
    pub fn is_interactive(self) -> bool {
        self == RenderDensity::Editing
    }
}

/// Axis-aligned rectangle in surface pixels
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanning two corner points in any order
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x: a.0.min(b.0),
            y: a.1.min(b.1),
            w: (a.0 - b.0).abs(),
            h: (a.1 - b.1).abs(),
        }
    }

    /// Rectangle of the given half extents around a center point
    pub fn centered(cx: f64, cy: f64, half_w: f64, half_h: f64) -> Self {
        Self::new(cx - half_w, cy - half_h, half_w * 2.0, half_h * 2.0)
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

/// Geometry of one element at one scale and density
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StaffLayout {
    pub dialect: Dialect,
    pub density: RenderDensity,

    /// Overall pixel multiplier
    pub scale: f64,

    /// Distance between two staff lines
    pub space: f64,

    pub staff_left: f64,
    pub staff_width: f64,
    pub staff_top: f64,

    /// X of every bar line, including the opening and closing ones
    pub measure_edges: Vec<f64>,

    /// Band above the staff holding chord slots (keyboard only)
    pub chord_band: Option<Rect>,

    /// Total drawing size
    pub width: f64,
    pub height: f64,
}

/// Staff steps kept free above and below the five lines, per dialect
fn vertical_reserve(dialect: Dialect) -> (f64, f64) {
    match dialect {
        // C6 two ledger lines up, stems from C4 one ledger line down
        Dialect::Keyboard => (3.5, 3.0),
        // Crash stems reach well above the staff, kick stems below it
        Dialect::Percussion => (4.5, 3.0),
    }
}

impl StaffLayout {
    /// Layout for raw geometry
    pub fn new(dialect: Dialect, measure_widths: &[f64], scale: f64, density: RenderDensity) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        let space = density.line_spacing() * scale;
        let padding = density.padding() * scale;

        let chord_band_height = match dialect {
            Dialect::Keyboard => density.chord_band_height() * scale,
            Dialect::Percussion => 0.0,
        };
        let (above, below) = vertical_reserve(dialect);

        let staff_left = padding;
        let unit = density.width_factor() * scale;
        let mut measure_edges = Vec::with_capacity(measure_widths.len() + 1);
        let mut x = staff_left;
        measure_edges.push(x);
        for w in measure_widths {
            x += w * unit;
            measure_edges.push(x);
        }
        let staff_width = x - staff_left;

        let staff_top = padding + chord_band_height + above * space;
        let staff_bottom = staff_top + 4.0 * space;
        let height = staff_bottom + below * space + padding;

        let chord_band = match dialect {
            Dialect::Keyboard => Some(Rect::new(staff_left, padding, staff_width, chord_band_height)),
            Dialect::Percussion => None,
        };

        Self {
            dialect,
            density,
            scale,
            space,
            staff_left,
            staff_width,
            staff_top,
            measure_edges,
            chord_band,
            width: staff_width + 2.0 * padding,
            height,
        }
    }

    /// Layout for an element. Compact renders honour the element's own
    /// on-page scale; the editing surface does not.
    pub fn for_element(element: &NotationElement, scale_factor: f64, density: RenderDensity) -> Self {
        let scale = match density {
            RenderDensity::Compact => scale_factor * element.effective_scale(),
            RenderDensity::Editing => scale_factor,
        };
        Self::new(element.dialect(), &element.measure_widths, scale, density)
    }

    pub fn staff_bottom(&self) -> f64 {
        self.staff_top + 4.0 * self.space
    }

    pub fn staff_right(&self) -> f64 {
        self.staff_left + self.staff_width
    }

    /// Y of the middle staff line
    pub fn middle_line(&self) -> f64 {
        self.staff_top + 2.0 * self.space
    }

    pub fn x_for_position(&self, position: f64) -> f64 {
        self.staff_left + position / 100.0 * self.staff_width
    }

    /// Note position for a surface x coordinate (clamped to [5, 95])
    pub fn position_at(&self, x: f64) -> f64 {
        position_from_x(x - self.staff_left, self.staff_width)
    }

    pub fn y_for_step(&self, step: i32) -> f64 {
        self.staff_top + step as f64 * self.space / 2.0
    }

    /// Staff steps below the top line for a surface y coordinate
    pub fn step_at(&self, y: f64) -> f64 {
        (y - self.staff_top) / (self.space / 2.0)
    }

    pub fn pitch_y(&self, pitch: Pitch) -> f64 {
        self.y_for_step(pitch.staff_step())
    }

    pub fn part_y(&self, part: PercussionPart) -> f64 {
        self.y_for_step(part.staff_step())
    }

    /// Vertical span cut into the fifteen pitch bands, C6 band on top
    pub fn pitch_span(&self) -> (f64, f64) {
        let quarter = self.space / 4.0;
        (
            self.pitch_y(Pitch::C6) - quarter,
            self.pitch_y(Pitch::C4) + quarter,
        )
    }

    pub fn notehead_rx(&self) -> f64 {
        self.space * 0.62
    }

    pub fn notehead_ry(&self) -> f64 {
        self.space * 0.45
    }

    pub fn stem_length(&self) -> f64 {
        self.space * 3.5
    }

    /// Rectangle used both for drawing a chord slot and for hitting it
    pub fn chord_slot_rect(&self, position: f64) -> Option<Rect> {
        let band = self.chord_band?;
        let cx = self.x_for_position(position);
        let half_w = self.space * 1.4;
        let inset = band.h * 0.15;
        Some(Rect::new(cx - half_w, band.y + inset, half_w * 2.0, band.h - inset * 2.0))
    }

    /// Hit zone of the resize handle on the right edge of `measure`
    pub fn handle_rect(&self, measure: usize, half_width: f64) -> Option<Rect> {
        let x = *self.measure_edges.get(measure + 1)?;
        let top = self.staff_top - self.space;
        let bottom = self.staff_bottom() + self.space;
        Some(Rect::new(x - half_width, top, half_width * 2.0, bottom - top))
    }

    /// Bounding box of a note head, grown by `padding`
    pub fn note_rect(&self, x: f64, y: f64, padding: f64) -> Rect {
        Rect::centered(x, y, self.notehead_rx() + padding, self.notehead_ry() + padding)
    }
}

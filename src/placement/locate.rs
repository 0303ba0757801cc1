//! Pointer-to-model mapping
//!
//! All functions here are total: any input, however far outside the staff,
//! maps to a valid part, pitch or position.

use crate::models::{PercussionPart, Pitch, PERCUSSION_PARTS, PITCHES_TOP_DOWN};

/// Horizontal margin kept free at both ends of the element, in position units
pub const POSITION_MARGIN: f64 = 5.0;

/// Part whose lane is closest to `step` (staff steps below the top line).
///
/// Equal distances resolve to the part that comes first in
/// [`PERCUSSION_PARTS`].
pub fn locate_part(step: f64) -> PercussionPart {
    let mut best = PERCUSSION_PARTS[0];
    let mut best_distance = f64::INFINITY;
    for part in PERCUSSION_PARTS {
        let distance = (part.staff_step() as f64 - step).abs();
        if distance < best_distance {
            best = part;
            best_distance = distance;
        }
    }
    best
}

/// Pitch whose band contains `y`.
///
/// The span `[span_top, span_bottom]` is cut into fifteen equal bands, the
/// top band being C6 and the bottom band C4. Points above or below the
/// span clamp to the outermost pitch.
pub fn locate_pitch(y: f64, span_top: f64, span_bottom: f64) -> Pitch {
    let height = span_bottom - span_top;
    if !(height > 0.0) || y.is_nan() {
        return PITCHES_TOP_DOWN[PITCHES_TOP_DOWN.len() / 2];
    }
    let band = ((y - span_top) / height * PITCHES_TOP_DOWN.len() as f64).floor();
    Pitch::from_band_index(band as i64)
}

/// Map a horizontal pixel offset inside a container of `container_width`
/// pixels to a note position in [5, 95].
pub fn position_from_x(x: f64, container_width: f64) -> f64 {
    if !(container_width > 0.0) || x.is_nan() {
        return 50.0;
    }
    let usable = 100.0 - 2.0 * POSITION_MARGIN;
    let position = POSITION_MARGIN + (x / container_width) * usable;
    position.clamp(POSITION_MARGIN, 100.0 - POSITION_MARGIN)
}

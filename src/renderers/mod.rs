//! Renderers module for the notation overlay
//!
//! This module turns notation elements into pre-positioned vector drawings
//! (display lists) and, optionally, SVG markup.

pub mod layout;
pub mod display_list;
pub mod beams;
pub mod notation;
pub mod svg;

// Re-export commonly used types
pub use layout::{Rect, RenderDensity, StaffLayout};
pub use display_list::{DisplayList, DrawItem, HitRegion, HitTarget, Shape, TextAnchor};
pub use beams::{build_beam, BeamGeometry, BeamMember, Segment};
pub use notation::{note_heads, render, render_with_options, RenderOptions};
pub use svg::to_svg;

/// Render an element straight to SVG markup
pub fn render_svg(
    element: &crate::models::NotationElement,
    scale_factor: f64,
    density: RenderDensity,
) -> String {
    to_svg(&render(element, scale_factor, density))
}

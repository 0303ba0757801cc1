//! SVG output
//!
//! Serializes a display list into a standalone SVG document, for hosts that
//! would rather insert markup than walk primitives.

use super::display_list::{DisplayList, DrawItem, Shape, TextAnchor};

const INK_COLOR: &str = "#1a1a1a";
const STAFF_COLOR: &str = "#555555";
const SELECTED_COLOR: &str = "#1e6fd9";
const GUIDE_COLOR: &str = "#8a8a8a";
const CHORD_COLOR: &str = "#4a4a9a";

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn color_for(item: &DrawItem) -> &'static str {
    if item.has_class("selected") || item.has_class("open") {
        SELECTED_COLOR
    } else if item.has_class("staff-line") || item.has_class("ledger-line") {
        STAFF_COLOR
    } else if item.has_class("chord-name") || item.has_class("chord-slot") {
        CHORD_COLOR
    } else if item.has_class("drag-rect") || item.has_class("measure-handle") {
        GUIDE_COLOR
    } else {
        INK_COLOR
    }
}

fn dash(dashed: bool) -> &'static str {
    if dashed {
        r#" stroke-dasharray="4 3""#
    } else {
        ""
    }
}

fn element_for(item: &DrawItem) -> String {
    let color = color_for(item);
    let class = item.classes.join(" ");
    match &item.shape {
        Shape::Line { x1, y1, x2, y2, stroke_width, dashed } => format!(
            r#"<line class="{}" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"{} stroke-linecap="round"/>"#,
            class, x1, y1, x2, y2, color, stroke_width, dash(*dashed)
        ),
        Shape::Ellipse { cx, cy, rx, ry, rotation, filled, stroke_width } => {
            let (fill, stroke) = if *filled { (color, "none") } else { ("none", color) };
            format!(
                r#"<ellipse class="{}" cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}" transform="rotate({:.0},{:.1},{:.1})"/>"#,
                class, cx, cy, rx, ry, fill, stroke, stroke_width, rotation, cx, cy
            )
        }
        Shape::Rect { x, y, w, h, filled, dashed, stroke_width } => {
            let fill = if *filled { color } else { "none" };
            format!(
                r#"<rect class="{}" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="{:.1}"{}/>"#,
                class, x, y, w, h, fill, color, stroke_width, dash(*dashed)
            )
        }
        Shape::Bar { x1, y1, x2, y2, thickness } => {
            let half = thickness / 2.0;
            format!(
                r#"<path class="{}" d="M{:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1} L{:.1},{:.1} Z" fill="{}"/>"#,
                class,
                x1, y1 - half,
                x2, y2 - half,
                x2, y2 + half,
                x1, y1 + half,
                color
            )
        }
        Shape::Path { d, stroke_width } => format!(
            r#"<path class="{}" d="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            class, d, color, stroke_width
        ),
        Shape::Text { x, y, text, size, anchor } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            format!(
                r#"<text class="{}" x="{:.1}" y="{:.1}" font-family="Times New Roman, serif" font-size="{:.0}" fill="{}" text-anchor="{}">{}</text>"#,
                class, x, y, size, color, anchor, escape(text)
            )
        }
    }
}

/// Convert a display list into an SVG document string
pub fn to_svg(list: &DisplayList) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {:.1} {:.1}" width="{:.1}" height="{:.1}">"#,
        list.width, list.height, list.width, list.height
    );
    svg.push('\n');
    for item in &list.items {
        svg.push_str("  ");
        svg.push_str(&element_for(item));
        svg.push('\n');
    }
    svg.push_str("</svg>\n");
    svg
}

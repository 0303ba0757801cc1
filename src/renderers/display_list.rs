//! Display list returned to the host
//!
//! A display list is a flat, pre-positioned vector drawing. The host draws
//! it as-is (canvas, SVG, DOM) without doing any layout of its own; the
//! editing density also carries hit regions so the host can map hovers and
//! cursors onto the same geometry the editor uses.

use serde::{Deserialize, Serialize};
use super::layout::Rect;

/// Text alignment around the anchor x
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// One drawing primitive, in surface pixels
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Shape {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke_width: f64,
        dashed: bool,
    },
    /// Filled or outlined ellipse, rotated by `rotation` degrees
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        filled: bool,
        stroke_width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        filled: bool,
        dashed: bool,
        stroke_width: f64,
    },
    /// Thick straight bar (beams)
    Bar {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        thickness: f64,
    },
    /// SVG path data, stroked
    Path { d: String, stroke_width: f64 },
    Text {
        x: f64,
        y: f64,
        text: String,
        size: f64,
        anchor: TextAnchor,
    },
}

/// A shape with its style classes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DrawItem {
    pub shape: Shape,

    /// Style classes, e.g. "note-head", "selected"
    pub classes: Vec<String>,
}

impl DrawItem {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// What a hit region belongs to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HitTarget {
    Note { index: usize },
    ChordSlot { index: usize },
    MeasureHandle { measure: usize },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HitRegion {
    pub target: HitTarget,
    pub rect: Rect,
}

/// Complete drawing of one element
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    pub items: Vec<DrawItem>,

    /// Empty for the compact density
    #[serde(default)]
    pub hit_regions: Vec<HitRegion>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            items: Vec::new(),
            hit_regions: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape, classes: &[&str]) {
        self.items.push(DrawItem {
            shape,
            classes: classes.iter().map(|c| c.to_string()).collect(),
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, classes: &[&str]) {
        self.push(
            Shape::Line { x1, y1, x2, y2, stroke_width, dashed: false },
            classes,
        );
    }

    pub fn rect(&mut self, rect: Rect, filled: bool, dashed: bool, stroke_width: f64, classes: &[&str]) {
        self.push(
            Shape::Rect {
                x: rect.x,
                y: rect.y,
                w: rect.w,
                h: rect.h,
                filled,
                dashed,
                stroke_width,
            },
            classes,
        );
    }

    pub fn text(&mut self, x: f64, y: f64, text: &str, size: f64, anchor: TextAnchor, classes: &[&str]) {
        self.push(
            Shape::Text {
                x,
                y,
                text: text.to_string(),
                size,
                anchor,
            },
            classes,
        );
    }

    pub fn hit(&mut self, target: HitTarget, rect: Rect) {
        self.hit_regions.push(HitRegion { target, rect });
    }

    /// Items carrying `class`
    pub fn items_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a DrawItem> + 'a {
        self.items.iter().filter(move |item| item.has_class(class))
    }

    /// Topmost hit region containing the point. Notes win over chord slots,
    /// which win over measure handles.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<HitTarget> {
        let rank = |t: &HitTarget| match t {
            HitTarget::Note { .. } => 0,
            HitTarget::ChordSlot { .. } => 1,
            HitTarget::MeasureHandle { .. } => 2,
        };
        self.hit_regions
            .iter()
            .filter(|r| r.rect.contains(x, y))
            .min_by_key(|r| rank(&r.target))
            .map(|r| r.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_prefers_notes() {
        let mut list = DisplayList::new(100.0, 100.0);
        list.hit(HitTarget::MeasureHandle { measure: 0 }, Rect::new(0.0, 0.0, 50.0, 50.0));
        list.hit(HitTarget::Note { index: 3 }, Rect::new(10.0, 10.0, 10.0, 10.0));
        assert_eq!(list.hit_test(15.0, 15.0), Some(HitTarget::Note { index: 3 }));
        assert_eq!(list.hit_test(40.0, 40.0), Some(HitTarget::MeasureHandle { measure: 0 }));
        assert_eq!(list.hit_test(90.0, 90.0), None);
    }

    #[test]
    fn test_shape_json_is_tagged() {
        let mut list = DisplayList::new(10.0, 10.0);
        list.line(0.0, 1.0, 2.0, 3.0, 1.0, &["staff-line"]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["items"][0]["shape"]["type"], "line");
        assert_eq!(json["items"][0]["shape"]["stroke_width"], 1.0);
        assert_eq!(json["items"][0]["classes"][0], "staff-line");
    }
}

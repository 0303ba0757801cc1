//! Notation renderer
//!
//! `render` turns an element into a display list. It is pure: the same
//! element, scale and density always give the same drawing. The compact and
//! editing presentations share every code path and differ only in the
//! [`RenderDensity`] passed to the layout, plus the interactive extras
//! (empty chord slots, hit regions, resize handles) the editing density
//! adds.

use std::collections::BTreeSet;

use crate::models::{
    Chord, Duration, NotationBody, NotationElement, NoteHeadStyle, PercussionNote, PitchNote, StemDirection,
};
use crate::placement::{chord_for_slot, cluster_chord_slots, orphan_chords};
use super::beams::{
    beam_thickness, build_beam, keyboard_beam_groups, keyboard_stem_direction, percussion_beam_groups,
    percussion_stem_direction, stem_x, BeamMember,
};
use super::display_list::{DisplayList, HitTarget, Shape, TextAnchor};
use super::layout::{Rect, RenderDensity, StaffLayout};

/// Editor state drawn on top of the element
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Selected note indices
    pub selection: BTreeSet<usize>,

    /// Live rectangle of a drag-select gesture
    pub drag_rect: Option<Rect>,

    /// Chord slot whose picker is open
    pub open_slot: Option<usize>,

    /// Extra pixels around a note head that still count as a hit
    pub note_hit_padding: f64,

    /// Half width of a measure resize handle's hit zone
    pub handle_hit_half_width: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            selection: BTreeSet::new(),
            drag_rect: None,
            open_slot: None,
            note_hit_padding: 3.0,
            handle_hit_half_width: 6.0,
        }
    }
}

/// A note reduced to what drawing needs
struct PlacedNote {
    index: usize,
    x: f64,
    y: f64,
    step: i32,
    duration: Duration,
    head: NoteHeadStyle,
    /// Stem direction when drawn on its own
    stem: StemDirection,
}

fn place_keyboard(notes: &[PitchNote], layout: &StaffLayout) -> Vec<PlacedNote> {
    let middle = layout.middle_line();
    notes
        .iter()
        .enumerate()
        .map(|(index, n)| {
            let y = layout.pitch_y(n.pitch);
            PlacedNote {
                index,
                x: layout.x_for_position(n.position),
                y,
                step: n.pitch.staff_step(),
                duration: n.duration,
                head: if n.duration.is_filled() { NoteHeadStyle::Filled } else { NoteHeadStyle::Hollow },
                stem: if y > middle { StemDirection::Up } else { StemDirection::Down },
            }
        })
        .collect()
}

fn place_percussion(notes: &[PercussionNote], layout: &StaffLayout) -> Vec<PlacedNote> {
    notes
        .iter()
        .enumerate()
        .map(|(index, n)| PlacedNote {
            index,
            x: layout.x_for_position(n.position),
            y: layout.part_y(n.part),
            step: n.part.staff_step(),
            duration: n.duration,
            head: n.part.head_style(n.note_type),
            stem: n.part.default_stem(),
        })
        .collect()
}

/// Surface coordinates of every note head, by note index
pub fn note_heads(element: &NotationElement, layout: &StaffLayout) -> Vec<(f64, f64)> {
    let placed = match &element.body {
        NotationBody::Keyboard { notes, .. } => place_keyboard(notes, layout),
        NotationBody::Percussion { notes } => place_percussion(notes, layout),
    };
    placed.iter().map(|p| (p.x, p.y)).collect()
}

/// Render with no editor overlay
pub fn render(element: &NotationElement, scale_factor: f64, density: RenderDensity) -> DisplayList {
    render_with_options(element, scale_factor, density, &RenderOptions::default())
}

/// Render an element, drawing editor state when the density is interactive
pub fn render_with_options(
    element: &NotationElement,
    scale_factor: f64,
    density: RenderDensity,
    options: &RenderOptions,
) -> DisplayList {
    let layout = StaffLayout::for_element(element, scale_factor, density);
    let mut list = DisplayList::new(layout.width, layout.height);
    let stroke = layout.space / 12.0;

    draw_staff(&mut list, &layout, stroke);

    let (placed, groups) = match &element.body {
        NotationBody::Keyboard { notes, chords } => {
            draw_chord_slots(&mut list, &layout, notes, chords, options, stroke);
            (place_keyboard(notes, &layout), keyboard_beam_groups(notes))
        }
        NotationBody::Percussion { notes } => {
            (place_percussion(notes, &layout), percussion_beam_groups(notes))
        }
    };

    let interactive = density.is_interactive();
    let selected = |index: usize| interactive && options.selection.contains(&index);

    for note in &placed {
        draw_ledger_lines(&mut list, &layout, note, stroke);
        draw_head(&mut list, &layout, note, selected(note.index), stroke);
    }

    let mut beamed = BTreeSet::new();
    for group in &groups {
        let stem = match &element.body {
            NotationBody::Keyboard { .. } => {
                let ys: Vec<f64> = group.iter().map(|&i| placed[i].y).collect();
                keyboard_stem_direction(&ys, layout.middle_line())
            }
            NotationBody::Percussion { notes } => {
                let parts: Vec<_> = group.iter().map(|&i| notes[i].part).collect();
                percussion_stem_direction(&parts)
            }
        };
        let members = group
            .iter()
            .map(|&i| BeamMember {
                index: i,
                x: placed[i].x,
                head_y: placed[i].y,
                duration: placed[i].duration,
            })
            .collect();
        let Some(geometry) = build_beam(members, stem, &layout) else { continue };

        for (segment, &index) in geometry.stems.iter().zip(&geometry.member_indices) {
            let classes: &[&str] = if selected(index) { &["stem", "selected"] } else { &["stem"] };
            list.line(segment.x1, segment.y1, segment.x2, segment.y2, stroke * 1.2, classes);
            beamed.insert(index);
        }
        for segment in &geometry.beams {
            list.push(
                Shape::Bar {
                    x1: segment.x1,
                    y1: segment.y1,
                    x2: segment.x2,
                    y2: segment.y2,
                    thickness: beam_thickness(&layout),
                },
                &["beam"],
            );
        }
    }

    for note in placed.iter().filter(|n| !beamed.contains(&n.index)) {
        draw_stem_and_flags(&mut list, &layout, note, selected(note.index), stroke);
    }

    if interactive {
        for note in &placed {
            let rect = layout.note_rect(note.x, note.y, options.note_hit_padding);
            list.hit(HitTarget::Note { index: note.index }, rect);
        }
        draw_measure_handles(&mut list, &layout, options);
        if let Some(rect) = options.drag_rect {
            list.rect(rect, false, true, stroke, &["drag-rect"]);
        }
    }

    list
}

fn draw_staff(list: &mut DisplayList, layout: &StaffLayout, stroke: f64) {
    for line in 0..5 {
        let y = layout.y_for_step(line * 2);
        list.line(layout.staff_left, y, layout.staff_right(), y, stroke, &["staff-line"]);
    }
    let last = layout.measure_edges.len().saturating_sub(1);
    for (i, &x) in layout.measure_edges.iter().enumerate() {
        let width = if i == last { stroke * 2.5 } else { stroke * 1.2 };
        list.line(x, layout.staff_top, x, layout.staff_bottom(), width, &["bar-line"]);
    }
}

fn draw_chord_slots(
    list: &mut DisplayList,
    layout: &StaffLayout,
    notes: &[PitchNote],
    chords: &[Chord],
    options: &RenderOptions,
    stroke: f64,
) {
    let Some(band) = layout.chord_band else { return };
    let interactive = layout.density.is_interactive();
    let font = layout.density.font_size() * layout.scale;
    let text_y = band.y + band.h / 2.0 + font * 0.35;

    let slots = cluster_chord_slots(notes);
    for (i, slot) in slots.iter().enumerate() {
        let Some(rect) = layout.chord_slot_rect(slot.position) else { continue };
        let chord = chord_for_slot(chords, slot.position).map(|c| &chords[c]);
        let open = interactive && options.open_slot == Some(i);

        if interactive {
            let mut classes = vec!["chord-slot", if chord.is_some() { "assigned" } else { "empty" }];
            if open {
                classes.push("open");
            }
            list.rect(rect, false, chord.is_none(), stroke, &classes);
            list.hit(HitTarget::ChordSlot { index: i }, rect);
        }
        if let Some(chord) = chord {
            list.text(rect.x + rect.w / 2.0, text_y, &chord.name, font, TextAnchor::Middle, &["chord-name"]);
        }
    }

    // Chords whose notes were moved away keep their label where they are
    for i in orphan_chords(chords, &slots) {
        let chord = &chords[i];
        let x = layout.x_for_position(chord.position);
        list.text(x, text_y, &chord.name, font, TextAnchor::Middle, &["chord-name", "orphan"]);
    }
}

fn draw_ledger_lines(list: &mut DisplayList, layout: &StaffLayout, note: &PlacedNote, stroke: f64) {
    let half = layout.notehead_rx() + layout.space * 0.35;
    let mut steps = Vec::new();
    let mut s = -2;
    while s >= note.step {
        steps.push(s);
        s -= 2;
    }
    let mut s = 10;
    while s <= note.step {
        steps.push(s);
        s += 2;
    }
    for step in steps {
        let y = layout.y_for_step(step);
        list.line(note.x - half, y, note.x + half, y, stroke, &["ledger-line"]);
    }
}

fn draw_head(list: &mut DisplayList, layout: &StaffLayout, note: &PlacedNote, selected: bool, stroke: f64) {
    let rx = layout.notehead_rx();
    let ry = layout.notehead_ry();
    let classes: &[&str] = if selected { &["note-head", "selected"] } else { &["note-head"] };
    let ellipse = |filled: bool| Shape::Ellipse {
        cx: note.x,
        cy: note.y,
        rx,
        ry,
        rotation: -15.0,
        filled,
        stroke_width: stroke * 1.3,
    };
    let cross = || {
        let dx = rx * 0.8;
        let dy = ry * 1.1;
        Shape::Path {
            d: format!(
                "M{:.2},{:.2} L{:.2},{:.2} M{:.2},{:.2} L{:.2},{:.2}",
                note.x - dx, note.y - dy, note.x + dx, note.y + dy,
                note.x - dx, note.y + dy, note.x + dx, note.y - dy
            ),
            stroke_width: stroke * 1.4,
        }
    };

    match note.head {
        NoteHeadStyle::Filled => list.push(ellipse(true), classes),
        NoteHeadStyle::Hollow => list.push(ellipse(false), classes),
        NoteHeadStyle::Cross => list.push(cross(), classes),
        NoteHeadStyle::RingedCross => {
            list.push(cross(), classes);
            list.push(
                Shape::Ellipse {
                    cx: note.x,
                    cy: note.y,
                    rx: rx * 1.1,
                    ry: rx * 1.1,
                    rotation: 0.0,
                    filled: false,
                    stroke_width: stroke,
                },
                classes,
            );
        }
        NoteHeadStyle::Ghost => {
            list.push(ellipse(true), classes);
            let size = layout.space * 1.6;
            let baseline = note.y + size * 0.3;
            list.text(note.x - rx * 1.5, baseline, "(", size, TextAnchor::Middle, &["ghost-paren"]);
            list.text(note.x + rx * 1.5, baseline, ")", size, TextAnchor::Middle, &["ghost-paren"]);
        }
    }
}

fn draw_stem_and_flags(list: &mut DisplayList, layout: &StaffLayout, note: &PlacedNote, selected: bool, stroke: f64) {
    if !note.duration.has_stem() {
        return;
    }
    let x = stem_x(note.x, note.stem, layout);
    let end_y = match note.stem {
        StemDirection::Up => note.y - layout.stem_length(),
        StemDirection::Down => note.y + layout.stem_length(),
    };
    let classes: &[&str] = if selected { &["stem", "selected"] } else { &["stem"] };
    list.line(x, note.y, x, end_y, stroke * 1.2, classes);

    // Flags hang from the stem end toward the head, curling right
    let toward_head = match note.stem {
        StemDirection::Up => 1.0,
        StemDirection::Down => -1.0,
    };
    let s = layout.space;
    for flag in 0..note.duration.flag_count() {
        let y = end_y + toward_head * flag as f64 * s * 0.8;
        list.push(
            Shape::Path {
                d: format!(
                    "M{:.2},{:.2} q{:.2},{:.2} {:.2},{:.2}",
                    x,
                    y,
                    s * 0.9,
                    toward_head * s * 0.8,
                    s * 0.6,
                    toward_head * s * 2.0
                ),
                stroke_width: stroke * 1.4,
            },
            &["flag"],
        );
    }
}

fn draw_measure_handles(list: &mut DisplayList, layout: &StaffLayout, options: &RenderOptions) {
    let measures = layout.measure_edges.len().saturating_sub(1);
    let grip_h = layout.space * 2.0;
    let grip_w = layout.space * 0.35;
    for measure in 0..measures {
        let x = layout.measure_edges[measure + 1];
        let grip = Rect::centered(x, layout.middle_line(), grip_w / 2.0, grip_h / 2.0);
        list.rect(grip, true, false, 0.0, &["measure-handle"]);
        if let Some(zone) = layout.handle_rect(measure, options.handle_hit_half_width) {
            list.hit(HitTarget::MeasureHandle { measure }, zone);
        }
    }
}

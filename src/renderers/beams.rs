//! Beam builder
//!
//! Notes sharing a beam id are drawn with one shared stem direction, stems
//! that all end on one horizontal baseline, a primary beam and, when any
//! member is a sixteenth, a secondary beam inside it.

use serde::{Deserialize, Serialize};
use crate::models::{Duration, PercussionNote, PercussionPart, PitchNote, StemDirection, PERCUSSION_PARTS};
use super::layout::StaffLayout;

/// One note of a beamed group, already placed on the surface
#[derive(Clone, Debug, PartialEq)]
pub struct BeamMember {
    /// Index into the element's note list
    pub index: usize,
    pub x: f64,
    pub head_y: f64,
    pub duration: Duration,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Drawable geometry of one beamed group
#[derive(Clone, Debug, PartialEq)]
pub struct BeamGeometry {
    pub stem: StemDirection,

    /// Y where every stem of the group ends
    pub baseline_y: f64,

    /// One stem per member, in position order
    pub stems: Vec<Segment>,

    /// Primary beam first, then the sixteenth beam if any
    pub beams: Vec<Segment>,

    /// Member note indices in position order
    pub member_indices: Vec<usize>,
}

/// Collect beam groups of at least two notes, in order of first
/// appearance. Each group is sorted by position.
fn collect_groups<'a>(entries: impl Iterator<Item = (usize, Option<&'a str>, f64)>) -> Vec<Vec<usize>> {
    let mut ids: Vec<&str> = Vec::new();
    let mut groups: Vec<Vec<(usize, f64)>> = Vec::new();
    for (index, id, position) in entries {
        let Some(id) = id else { continue };
        match ids.iter().position(|known| *known == id) {
            Some(g) => groups[g].push((index, position)),
            None => {
                ids.push(id);
                groups.push(vec![(index, position)]);
            }
        }
    }
    groups
        .into_iter()
        .filter(|g| g.len() >= 2)
        .map(|mut g| {
            g.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
            g.into_iter().map(|(i, _)| i).collect()
        })
        .collect()
}

/// Beamed groups of a keyboard element
pub fn keyboard_beam_groups(notes: &[PitchNote]) -> Vec<Vec<usize>> {
    collect_groups(
        notes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.beam_group.as_deref(), n.position)),
    )
}

/// Beamed groups of a percussion element. Non-beamable parts never join
/// a group, whatever id they carry.
pub fn percussion_beam_groups(notes: &[PercussionNote]) -> Vec<Vec<usize>> {
    collect_groups(
        notes
            .iter()
            .enumerate()
            .map(|(i, n)| (i, n.effective_beam_group(), n.position)),
    )
}

/// Keyboard groups sitting low on the staff take stems up
pub fn keyboard_stem_direction(head_ys: &[f64], middle_line: f64) -> StemDirection {
    if head_ys.is_empty() {
        return StemDirection::Up;
    }
    let avg = head_ys.iter().sum::<f64>() / head_ys.len() as f64;
    if avg > middle_line {
        StemDirection::Up
    } else {
        StemDirection::Down
    }
}

/// Percussion stems point away from a kick when one is present, else they
/// follow the part that occurs most often (earlier parts win ties).
pub fn percussion_stem_direction(parts: &[PercussionPart]) -> StemDirection {
    if parts.contains(&PercussionPart::Kick) {
        return PercussionPart::Kick.default_stem().opposite();
    }
    let mut dominant: Option<(PercussionPart, usize)> = None;
    for part in PERCUSSION_PARTS {
        let count = parts.iter().filter(|p| **p == part).count();
        if count > 0 && dominant.map_or(true, |(_, best)| count > best) {
            dominant = Some((part, count));
        }
    }
    dominant.map_or(StemDirection::Up, |(part, _)| part.default_stem())
}

/// X of the stem attached to a head centred on `x`
pub fn stem_x(x: f64, stem: StemDirection, layout: &StaffLayout) -> f64 {
    let offset = layout.notehead_rx() * 0.9;
    match stem {
        StemDirection::Up => x + offset,
        StemDirection::Down => x - offset,
    }
}

pub fn beam_thickness(layout: &StaffLayout) -> f64 {
    layout.space * 0.45
}

/// Build the geometry for one group. Groups of fewer than two members are
/// not beamed.
pub fn build_beam(mut members: Vec<BeamMember>, stem: StemDirection, layout: &StaffLayout) -> Option<BeamGeometry> {
    if members.len() < 2 {
        return None;
    }
    members.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.index.cmp(&b.index)));

    let stem_length = layout.stem_length();
    let baseline_y = match stem {
        StemDirection::Up => members.iter().map(|m| m.head_y).fold(f64::INFINITY, f64::min) - stem_length,
        StemDirection::Down => members.iter().map(|m| m.head_y).fold(f64::NEG_INFINITY, f64::max) + stem_length,
    };

    let stems: Vec<Segment> = members
        .iter()
        .map(|m| {
            let sx = stem_x(m.x, stem, layout);
            Segment { x1: sx, y1: m.head_y, x2: sx, y2: baseline_y }
        })
        .collect();

    let first_x = stems[0].x1;
    let last_x = stems[stems.len() - 1].x1;
    let mut beams = vec![Segment { x1: first_x, y1: baseline_y, x2: last_x, y2: baseline_y }];

    if members.iter().any(|m| m.duration == Duration::Sixteenth) {
        let gap = beam_thickness(layout) + layout.space * 0.3;
        let y = match stem {
            StemDirection::Up => baseline_y + gap,
            StemDirection::Down => baseline_y - gap,
        };
        beams.push(Segment { x1: first_x, y1: y, x2: last_x, y2: y });
    }

    Some(BeamGeometry {
        stem,
        baseline_y,
        stems,
        beams,
        member_indices: members.iter().map(|m| m.index).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dialect, Pitch};
    use crate::renderers::layout::RenderDensity;

    fn layout() -> StaffLayout {
        StaffLayout::new(Dialect::Keyboard, &[300.0], 1.0, RenderDensity::Editing)
    }

    fn member(index: usize, x: f64, head_y: f64, duration: Duration) -> BeamMember {
        BeamMember { index, x, head_y, duration }
    }

    #[test]
    fn test_single_member_is_not_beamed() {
        let l = layout();
        assert!(build_beam(vec![member(0, 50.0, 80.0, Duration::Eighth)], StemDirection::Up, &l).is_none());
    }

    #[test]
    fn test_stems_share_one_baseline() {
        let l = layout();
        let geo = build_beam(
            vec![
                member(1, 120.0, 100.0, Duration::Eighth),
                member(0, 60.0, 90.0, Duration::Eighth),
            ],
            StemDirection::Up,
            &l,
        )
        .unwrap();
        assert_eq!(geo.member_indices, vec![0, 1]);
        assert_eq!(geo.baseline_y, 90.0 - l.stem_length());
        assert!(geo.stems.iter().all(|s| s.y2 == geo.baseline_y));
        assert_eq!(geo.beams.len(), 1);
        assert!(geo.beams[0].x1 < geo.beams[0].x2);
    }

    #[test]
    fn test_sixteenth_adds_inner_beam() {
        let l = layout();
        let geo = build_beam(
            vec![
                member(0, 60.0, 90.0, Duration::Eighth),
                member(1, 120.0, 90.0, Duration::Sixteenth),
            ],
            StemDirection::Down,
            &l,
        )
        .unwrap();
        assert_eq!(geo.baseline_y, 90.0 + l.stem_length());
        assert_eq!(geo.beams.len(), 2);
        // Inner beam sits between the primary beam and the heads
        assert!(geo.beams[1].y1 < geo.beams[0].y1);
    }

    #[test]
    fn test_keyboard_direction_follows_average_height() {
        let l = layout();
        let low = l.pitch_y(Pitch::D4);
        let high = l.pitch_y(Pitch::A5);
        assert_eq!(keyboard_stem_direction(&[low, low], l.middle_line()), StemDirection::Up);
        assert_eq!(keyboard_stem_direction(&[high, high], l.middle_line()), StemDirection::Down);
    }

    #[test]
    fn test_percussion_direction() {
        use PercussionPart::*;
        assert_eq!(percussion_stem_direction(&[HiHat, Kick]), StemDirection::Up);
        assert_eq!(percussion_stem_direction(&[Snare, Snare]), StemDirection::Up);
        assert_eq!(percussion_stem_direction(&[]), StemDirection::Up);
    }

    #[test]
    fn test_groups_need_two_members() {
        let mut notes = vec![
            PitchNote::new(Pitch::C5, 30.0, Duration::Eighth),
            PitchNote::new(Pitch::D5, 10.0, Duration::Eighth),
            PitchNote::new(Pitch::E5, 60.0, Duration::Eighth),
        ];
        notes[0].beam_group = Some("a".into());
        notes[1].beam_group = Some("a".into());
        notes[2].beam_group = Some("b".into());
        assert_eq!(keyboard_beam_groups(&notes), vec![vec![1, 0]]);
    }

    #[test]
    fn test_non_beamable_parts_are_ignored() {
        let mut notes = vec![
            PercussionNote::new(PercussionPart::Kick, 10.0, Duration::Eighth),
            PercussionNote::new(PercussionPart::Kick, 30.0, Duration::Eighth),
            PercussionNote::new(PercussionPart::HiHat, 10.0, Duration::Eighth),
            PercussionNote::new(PercussionPart::HiHat, 30.0, Duration::Eighth),
        ];
        for n in notes.iter_mut() {
            n.beam_group = Some("g".into());
        }
        assert_eq!(percussion_beam_groups(&notes), vec![vec![2, 3]]);
    }
}

//! Chord-slot clustering for the keyboard dialect
//!
//! Notes are grouped into slots in one left-to-right pass: each note joins
//! the most recently opened slot when it lies within
//! [`CLUSTER_THRESHOLD`] of that slot's running average, otherwise it opens
//! a new slot. Chains of close notes therefore merge even when their
//! extremes are further apart than the threshold.

use serde::{Deserialize, Serialize};
use crate::models::{Chord, PitchNote};

/// Horizontal distance under which notes share a chord slot
pub const CLUSTER_THRESHOLD: f64 = 5.0;

/// One vertical chord slot above the staff
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChordSlot {
    /// Indices into the note list, in position order
    pub note_indices: Vec<usize>,

    /// Average position of the member notes
    pub position: f64,
}

/// Cluster keyboard notes into chord slots, ordered by position
pub fn cluster_chord_slots(notes: &[PitchNote]) -> Vec<ChordSlot> {
    let mut order: Vec<usize> = (0..notes.len()).collect();
    order.sort_by(|&a, &b| notes[a].position.total_cmp(&notes[b].position).then(a.cmp(&b)));

    let mut slots: Vec<ChordSlot> = Vec::new();
    for idx in order {
        let position = notes[idx].position;
        match slots.last_mut() {
            Some(slot) if (position - slot.position).abs() < CLUSTER_THRESHOLD => {
                let count = slot.note_indices.len() as f64;
                slot.position = (slot.position * count + position) / (count + 1.0);
                slot.note_indices.push(idx);
            }
            _ => slots.push(ChordSlot {
                note_indices: vec![idx],
                position,
            }),
        }
    }
    slots
}

/// Index of the chord attached to a slot at `slot_position`: the nearest
/// chord within the clustering threshold.
pub fn chord_for_slot(chords: &[Chord], slot_position: f64) -> Option<usize> {
    chords
        .iter()
        .enumerate()
        .map(|(i, c)| (i, (c.position - slot_position).abs()))
        .filter(|(_, d)| *d < CLUSTER_THRESHOLD)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Chords not attached to any slot
pub fn orphan_chords(chords: &[Chord], slots: &[ChordSlot]) -> Vec<usize> {
    let attached: Vec<usize> = slots
        .iter()
        .filter_map(|s| chord_for_slot(chords, s.position))
        .collect();
    (0..chords.len()).filter(|i| !attached.contains(i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Duration, Pitch};

    fn notes_at(positions: &[f64]) -> Vec<PitchNote> {
        positions
            .iter()
            .map(|&p| PitchNote::new(Pitch::E4, p, Duration::Quarter))
            .collect()
    }

    #[test]
    fn test_close_notes_share_one_slot() {
        let slots = cluster_chord_slots(&notes_at(&[48.0, 50.0, 52.0]));
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].note_indices, vec![0, 1, 2]);
        assert!((slots[0].position - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_slots_follow_position_order() {
        let slots = cluster_chord_slots(&notes_at(&[70.0, 10.0, 40.0, 12.0]));
        let groups: Vec<_> = slots.iter().map(|s| s.note_indices.clone()).collect();
        assert_eq!(groups, vec![vec![1, 3], vec![2], vec![0]]);
    }

    #[test]
    fn test_chaining_merges_wide_runs() {
        // Extremes are 6.5 apart, but each note is within the threshold of
        // the running average when it is folded in
        let slots = cluster_chord_slots(&notes_at(&[10.0, 14.0, 16.5]));
        assert_eq!(slots.len(), 1);
        assert!((slots[0].position - 13.5).abs() < 1e-9);
    }

    #[test]
    fn test_clustering_is_idempotent() {
        let notes = notes_at(&[5.0, 9.0, 30.0, 33.0, 34.5, 80.0]);
        assert_eq!(cluster_chord_slots(&notes), cluster_chord_slots(&notes));
    }

    #[test]
    fn test_chord_for_slot_picks_nearest() {
        let chords = vec![Chord::new("C", 46.0), Chord::new("G", 51.0), Chord::new("F", 80.0)];
        assert_eq!(chord_for_slot(&chords, 50.0), Some(1));
        assert_eq!(chord_for_slot(&chords, 65.0), None);

        let slots = cluster_chord_slots(&notes_at(&[50.0]));
        assert_eq!(orphan_chords(&chords, &slots), vec![0, 2]);
    }
}

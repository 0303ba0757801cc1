use crate::models::NotationBody;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Versioned state: notes and chords only. Measure geometry and scale are
/// never part of a snapshot.
pub type Snapshot = NotationBody;

/// Linear snapshot history with a current index
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UndoStack {
    /// Every recorded state, oldest first; never empty
    pub snapshots: VecDeque<Snapshot>,
    /// Index of the state the draft currently shows
    pub current_index: usize,
    /// Maximum number of snapshots to keep, including the initial one
    max_size: usize,
}

impl UndoStack {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: Snapshot, max_size: usize) -> Self {
        let mut snapshots = VecDeque::new();
        snapshots.push_back(initial);
        Self {
            snapshots,
            current_index: 0,
            max_size: max_size.max(2),
        }
    }

    /// Record a new state after a mutation.
    ///
    /// Any redo states beyond the current index are discarded first.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.current_index + 1);
        self.snapshots.push_back(snapshot);
        self.current_index = self.snapshots.len() - 1;

        // Enforce max size
        if self.snapshots.len() > self.max_size {
            self.snapshots.pop_front();
            self.current_index = self.current_index.saturating_sub(1);
        }
    }

    /// Step back; returns the state to restore, or None at the start
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.current_index -= 1;
        self.snapshots.get(self.current_index)
    }

    /// Step forward; returns the state to restore, or None at the end
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.current_index += 1;
        self.snapshots.get(self.current_index)
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.current_index)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.current_index > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.current_index + 1 < self.snapshots.len()
    }

    /// Drop all history and start again from `initial`
    pub fn reset(&mut self, initial: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push_back(initial);
        self.current_index = 0;
    }

    /// Get the number of available undo steps
    pub fn undo_count(&self) -> usize {
        self.current_index
    }

    /// Get the number of available redo steps
    pub fn redo_count(&self) -> usize {
        self.snapshots.len() - 1 - self.current_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chord, Dialect, Duration, PitchNote, Pitch};

    fn body(positions: &[f64]) -> Snapshot {
        NotationBody::Keyboard {
            notes: positions
                .iter()
                .map(|&p| PitchNote::new(Pitch::C5, p, Duration::Quarter))
                .collect(),
            chords: vec![Chord::new("C", 50.0)],
        }
    }

    #[test]
    fn test_new_stack_cannot_move() {
        let mut stack = UndoStack::new(NotationBody::empty(Dialect::Percussion), 10);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert!(stack.undo().is_none());
        assert!(stack.redo().is_none());
        assert_eq!(stack.current(), Some(&NotationBody::empty(Dialect::Percussion)));
    }

    #[test]
    fn test_undo_redo_restore_snapshots() {
        let mut stack = UndoStack::new(body(&[]), 10);
        stack.push(body(&[10.0]));
        stack.push(body(&[10.0, 20.0]));

        assert_eq!(stack.undo(), Some(&body(&[10.0])));
        assert_eq!(stack.undo(), Some(&body(&[])));
        assert_eq!(stack.undo(), None);
        assert_eq!(stack.redo(), Some(&body(&[10.0])));
        assert_eq!(stack.undo_count(), 1);
        assert_eq!(stack.redo_count(), 1);
    }

    #[test]
    fn test_push_after_undo_discards_redo() {
        let mut stack = UndoStack::new(body(&[]), 10);
        stack.push(body(&[10.0]));
        stack.push(body(&[10.0, 20.0]));
        stack.undo();
        stack.push(body(&[10.0, 70.0]));

        assert!(!stack.can_redo());
        assert_eq!(stack.snapshots.len(), 3);
        assert_eq!(stack.current(), Some(&body(&[10.0, 70.0])));
    }

    #[test]
    fn test_max_size_drops_oldest() {
        let mut stack = UndoStack::new(body(&[]), 3);
        for p in [1.0, 2.0, 3.0, 4.0] {
            stack.push(body(&[p]));
        }
        assert_eq!(stack.snapshots.len(), 3);
        assert_eq!(stack.undo_count(), 2);
        assert_eq!(stack.current(), Some(&body(&[4.0])));
    }

    #[test]
    fn test_reset() {
        let mut stack = UndoStack::new(body(&[]), 10);
        stack.push(body(&[5.0]));
        stack.reset(body(&[9.0]));
        assert!(!stack.can_undo());
        assert_eq!(stack.current(), Some(&body(&[9.0])));
    }
}

// Invariants that must hold after arbitrary edit sequences: positions stay
// in range, percussion spacing rules are never broken, and undo/redo
// restore exact snapshots.

use notation_wasm::config::EditorConfig;
use notation_wasm::editor::EditorSession;
use notation_wasm::models::{
    Anchor, Dialect, Duration, NotationBody, PercussionPart, PERCUSSION_PARTS, PITCHES_TOP_DOWN,
};
use notation_wasm::placement::{cluster_chord_slots, is_valid_arrangement};

/// Small deterministic generator so the sequences are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn position(&mut self) -> f64 {
        // Deliberately strays outside 0..=100
        self.below(1300) as f64 / 10.0 - 15.0
    }
}

fn positions(session: &EditorSession) -> Vec<f64> {
    match &session.element().unwrap().body {
        NotationBody::Keyboard { notes, chords } => notes
            .iter()
            .map(|n| n.position)
            .chain(chords.iter().map(|c| c.position))
            .collect(),
        NotationBody::Percussion { notes } => notes.iter().map(|n| n.position).collect(),
    }
}

#[test]
fn test_percussion_rules_hold_after_random_edits() {
    let mut rng = Lcg(7);
    let mut session = EditorSession::new(Dialect::Percussion, 0, Anchor::default(), EditorConfig::default());
    session.choose_measure_count(2).unwrap();

    for _ in 0..600 {
        match rng.below(10) {
            0..=5 => {
                let part = PERCUSSION_PARTS[rng.below(8) as usize];
                let position = rng.position();
                session.insert_percussion_note(part, position);
            }
            6 | 7 => {
                let count = session.element().unwrap().note_count() as u64;
                if count > 0 {
                    session.set_selection(&[rng.below(count) as usize]);
                    session.delete();
                }
            }
            8 => {
                let count = session.element().unwrap().note_count() as u64;
                if count > 0 {
                    session.set_selection(&[rng.below(count) as usize]);
                    let delta = rng.below(21) as f64 - 10.0;
                    session.move_selection(delta, 0);
                    session.clear_selection();
                }
            }
            _ => {
                if rng.below(2) == 0 {
                    session.undo();
                } else {
                    session.redo();
                }
            }
        }

        let NotationBody::Percussion { notes } = &session.element().unwrap().body else {
            panic!("expected percussion body");
        };
        assert!(is_valid_arrangement(notes), "spacing broken: {:?}", notes);
        assert!(positions(&session).iter().all(|p| (0.0..=100.0).contains(p)));
    }
}

#[test]
fn test_keyboard_positions_stay_clamped() {
    let mut rng = Lcg(42);
    let mut session = EditorSession::new(Dialect::Keyboard, 0, Anchor::default(), EditorConfig::default());
    session.choose_measure_count(4).unwrap();

    for _ in 0..300 {
        let count = session.element().unwrap().note_count() as u64;
        match rng.below(6) {
            0..=2 => {
                let pitch = PITCHES_TOP_DOWN[rng.below(15) as usize];
                let position = rng.position();
                session.insert_pitch_note(pitch, position);
            }
            3 if count > 0 => {
                session.set_selection(&[rng.below(count) as usize]);
                let delta = rng.below(81) as f64 - 40.0;
                let steps = rng.below(9) as i32 - 4;
                session.move_selection(delta, steps);
            }
            4 if count > 0 => {
                if session.open_chord_picker(0) {
                    session.apply_chord_name("Cmaj7");
                }
            }
            _ => {
                session.undo();
            }
        }
        assert!(positions(&session).iter().all(|p| (0.0..=100.0).contains(p)));
    }
}

#[test]
fn test_undo_redo_round_trip_every_mutation() {
    let mut session = EditorSession::new(Dialect::Keyboard, 0, Anchor::default(), EditorConfig::default());
    session.choose_measure_count(2).unwrap();
    session.insert_pitch_note(notation_wasm::Pitch::C5, 20.0);
    session.insert_pitch_note(notation_wasm::Pitch::E5, 22.0);
    session.insert_pitch_note(notation_wasm::Pitch::G4, 70.0);

    let mutations: Vec<Box<dyn Fn(&mut EditorSession) -> bool>> = vec![
        Box::new(|s: &mut EditorSession| {
            s.set_selection(&[0, 1]);
            s.group()
        }),
        Box::new(|s: &mut EditorSession| {
            s.set_selection(&[0, 1]);
            s.ungroup()
        }),
        Box::new(|s: &mut EditorSession| {
            s.set_selection(&[2]);
            s.set_selection_duration(Duration::Sixteenth)
        }),
        Box::new(|s: &mut EditorSession| {
            s.set_selection(&[2]);
            s.move_selection(5.0, -1)
        }),
        Box::new(|s: &mut EditorSession| s.open_chord_picker(0) && s.apply_chord_name("Am7")),
        Box::new(|s: &mut EditorSession| s.open_chord_picker(0) && s.clear_chord()),
        Box::new(|s: &mut EditorSession| {
            s.set_selection(&[1]);
            s.delete()
        }),
        Box::new(|s: &mut EditorSession| s.insert_pitch_note(notation_wasm::Pitch::B4, 90.0)),
    ];

    for mutate in &mutations {
        let before = session.element().unwrap().body.clone();
        assert!(mutate(&mut session));
        let after = session.element().unwrap().body.clone();

        assert!(session.undo());
        assert_eq!(session.element().unwrap().body, before);
        assert!(session.redo());
        assert_eq!(session.element().unwrap().body, after);
    }

    // New edit after undo drops the redo branch
    session.undo();
    session.undo();
    assert!(session.can_redo());
    session.insert_pitch_note(notation_wasm::Pitch::D5, 10.0);
    assert!(!session.can_redo());
    assert!(!session.redo());
}

#[test]
fn test_clustering_is_idempotent_on_session_notes() {
    let mut rng = Lcg(3);
    let mut session = EditorSession::new(Dialect::Keyboard, 0, Anchor::default(), EditorConfig::default());
    session.choose_measure_count(3).unwrap();
    for _ in 0..40 {
        let pitch = PITCHES_TOP_DOWN[rng.below(15) as usize];
        let position = rng.position();
        session.insert_pitch_note(pitch, position);
    }
    let NotationBody::Keyboard { notes, .. } = &session.element().unwrap().body else {
        panic!("expected keyboard body");
    };
    assert_eq!(cluster_chord_slots(notes), cluster_chord_slots(notes));
}

#[test]
fn test_group_with_kick_is_a_noop() {
    let mut session = EditorSession::new(Dialect::Percussion, 0, Anchor::default(), EditorConfig::default());
    session.choose_measure_count(1).unwrap();
    session.insert_percussion_note(PercussionPart::Snare, 20.0);
    session.insert_percussion_note(PercussionPart::Kick, 20.0);
    session.set_selection(&[0, 1]);
    let before = session.element().unwrap().body.clone();
    assert!(!session.group());
    assert_eq!(session.element().unwrap().body, before);
    assert_eq!(session.selection(), vec![0, 1]);
}

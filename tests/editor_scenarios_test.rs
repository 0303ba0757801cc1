// End-to-end editor scenarios driven through the public session API:
// click-to-add, spacing rejection, chord-slot clustering, beam grouping,
// and measure resize saturation.

use notation_wasm::config::EditorConfig;
use notation_wasm::editor::{EditorMode, EditorSession};
use notation_wasm::models::{Anchor, Dialect, NotationBody, PercussionPart, Pitch};
use notation_wasm::placement::cluster_chord_slots;

fn new_session(dialect: Dialect, measures: u32) -> EditorSession {
    let mut session = EditorSession::new(dialect, 0, Anchor::new(50.0, 50.0), EditorConfig::default());
    session.choose_measure_count(measures).unwrap();
    session
}

#[test]
fn test_click_adds_c4_at_position_10() {
    let mut session = new_session(Dialect::Keyboard, 2);
    assert_eq!(session.mode(), EditorMode::Editing);

    let layout = session.layout().unwrap();
    let x = layout.staff_left + (10.0 - 5.0) / 90.0 * layout.staff_width;
    let y = layout.pitch_y(Pitch::C4);
    session.pointer_down(x, y);
    session.pointer_move(x + 3.0, y + 1.0);
    assert!(session.pointer_up(x + 3.0, y + 1.0));

    match &session.element().unwrap().body {
        NotationBody::Keyboard { notes, chords } => {
            assert_eq!(notes.len(), 1);
            assert_eq!(notes[0].pitch, Pitch::C4);
            assert!((notes[0].position - 10.0).abs() < 1e-9);
            assert!(notes[0].beam_group.is_none());
            assert!(chords.is_empty());
        }
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_second_snare_too_close_is_rejected() {
    let mut session = new_session(Dialect::Percussion, 1);
    assert!(session.insert_percussion_note(PercussionPart::Snare, 20.0));
    assert!(!session.insert_percussion_note(PercussionPart::Snare, 21.0));

    let element = session.element().unwrap();
    assert_eq!(element.note_count(), 1);
    // A rejected insertion leaves no history entry behind
    assert!(session.undo());
    assert!(!session.undo());
}

#[test]
fn test_three_close_notes_share_one_slot() {
    let mut session = new_session(Dialect::Keyboard, 1);
    for (pitch, position) in [(Pitch::C5, 48.0), (Pitch::E5, 50.0), (Pitch::G5, 52.0)] {
        session.insert_pitch_note(pitch, position);
    }
    let NotationBody::Keyboard { notes, .. } = &session.element().unwrap().body else {
        panic!("expected keyboard body");
    };
    let slots = cluster_chord_slots(notes);
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].note_indices.len(), 3);
    assert!((slots[0].position - 50.0).abs() < 1e-9);

    let list = session.display_list().unwrap();
    assert_eq!(list.items_with_class("chord-slot").count(), 1);
}

#[test]
fn test_group_then_ungroup_hihats() {
    let mut session = new_session(Dialect::Percussion, 1);
    session.insert_percussion_note(PercussionPart::HiHat, 30.0);
    session.insert_percussion_note(PercussionPart::HiHat, 40.0);
    session.set_selection(&[0, 1]);

    assert!(session.group());
    let NotationBody::Percussion { notes } = &session.element().unwrap().body else {
        panic!("expected percussion body");
    };
    let id = notes[0].beam_group.clone();
    assert!(id.is_some());
    assert_eq!(notes[1].beam_group, id);
    assert_eq!(session.display_list().unwrap().items_with_class("beam").count(), 1);

    assert!(session.ungroup());
    let NotationBody::Percussion { notes } = &session.element().unwrap().body else {
        panic!("expected percussion body");
    };
    assert!(notes.iter().all(|n| n.beam_group.is_none()));
}

#[test]
fn test_resize_saturates_at_max_width() {
    let config = EditorConfig::default();
    let mut session = new_session(Dialect::Percussion, 3);
    let layout = session.layout().unwrap();
    let edge = layout.measure_edges[2];
    let y = layout.middle_line();

    assert!(session.pointer_down(edge, y));
    session.pointer_move(edge + 5_000.0, y);
    assert!(session.pointer_up(edge + 5_000.0, y));

    let element = session.element().unwrap();
    assert_eq!(element.measure_count, 3);
    assert_eq!(element.measure_widths.len(), 3);
    assert_eq!(element.measure_widths[1], config.max_measure_width);
    assert_eq!(element.measure_widths[0], Dialect::Percussion.default_measure_width(3));
    assert_eq!(element.measure_widths[2], Dialect::Percussion.default_measure_width(3));
}

#[test]
fn test_cancel_discards_edits_to_existing_element() {
    let mut session = new_session(Dialect::Keyboard, 1);
    session.insert_pitch_note(Pitch::A4, 40.0);
    let saved = session.save().unwrap();

    let mut reopened = EditorSession::open(saved.clone(), EditorConfig::default()).unwrap();
    reopened.set_selection(&[0]);
    reopened.delete();
    assert!(!reopened.can_save());
    reopened.cancel();

    assert_eq!(reopened.mode(), EditorMode::Closed);
    assert!(reopened.save().is_none());
    assert_eq!(saved.note_count(), 1);
}

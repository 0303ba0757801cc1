//! Interactive editor
//!
//! Turns pointer gestures and toolbar commands into edits of one notation
//! element, with a linear undo/redo history of its notes and chords.

pub mod gesture;
pub mod chord_picker;
pub mod session;

pub use gesture::{Gesture, MeasureResize, Press};
pub use chord_picker::ChordPicker;
pub use session::{EditorMode, EditorSession, MAX_SCALE, MIN_SCALE};

//! Notation Overlay WASM Module
//!
//! Keyboard and percussion notation fragments placed on top of score pages:
//! the element model, placement and chord-slot clustering, beam building,
//! rendering to display lists, and the interactive editor with undo/redo.

pub mod models;
pub mod placement;
pub mod renderers;
pub mod editor;
pub mod undo;
pub mod config;
pub mod error;
pub mod api;

// Re-export commonly used types
pub use models::{
    Anchor, Chord, Dialect, Duration, NotationBody, NotationElement, PercussionNote, PercussionPart, Pitch, PitchNote,
};
pub use config::EditorConfig;
pub use error::{NotationError, Result};
pub use editor::{EditorMode, EditorSession};
pub use renderers::{render, render_svg, DisplayList, RenderDensity};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("logger already initialized");
    }

    log::info!("Notation overlay WASM module initialized");
}

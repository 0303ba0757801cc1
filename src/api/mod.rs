//! Notation overlay WASM API
//!
//! This module provides the JavaScript-facing API: a stateful editor class
//! for one open session and stateless render functions for saved elements.
//!
//! # Module Structure
//!
//! - `helpers`: Shared utilities for serialization, argument parsing, error conversion and logging
//! - `editor`: The `NotationEditor` class
//! - `render`: Display-list and SVG rendering of saved elements

pub mod helpers;
pub mod editor;
pub mod render;

pub use editor::NotationEditor;
pub use render::{chord_slots, default_measure_width, render_notation, render_notation_svg};

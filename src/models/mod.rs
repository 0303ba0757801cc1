//! Models module for the notation overlay editor
//!
//! This module contains the data types of a notation element and the
//! fixed lookup tables for pitches and percussion parts.

pub mod core;
pub mod notation;
pub mod pitch;
pub mod percussion;
pub mod chord;

// Re-export commonly used types
pub use self::core::*;
pub use notation::*;
pub use pitch::{Pitch, PITCHES_TOP_DOWN, MIDDLE_LINE_STEP};
pub use percussion::*;
pub use chord::*;

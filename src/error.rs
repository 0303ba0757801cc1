//! Error types for the host boundary
//!
//! Editing itself never fails: out-of-range input is clamped and rule
//! violations are dropped. These errors only cover what the host hands us.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotationError {
    /// Measure count outside 1..=4
    #[error("Invalid measure count: {0} (must be 1-4)")]
    InvalidMeasureCount(u32),

    /// The requested operation needs a different editor mode
    #[error("Operation '{operation}' is not available while {mode}")]
    WrongMode {
        operation: &'static str,
        mode: &'static str,
    },

    /// Element payload could not be read or written
    #[error("Malformed notation element: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for NotationError {
    fn from(err: serde_json::Error) -> Self {
        NotationError::Malformed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NotationError>;

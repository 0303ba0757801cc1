//! Editor configuration supplied by the host
//!
//! Every field has a default, so the host may pass a partial object (or
//! nothing at all).

use serde::{Deserialize, Serialize};
use crate::models::Duration;

/// Tunable editor constants
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Pointer travel (pixels) below which a press resolves as a click
    pub click_threshold_px: f64,

    /// Half width (pixels) of a measure boundary's grab zone
    pub handle_hit_half_width: f64,

    /// Extra pixels around a note head that still select it
    pub note_hit_padding: f64,

    /// Allowed range of a single measure width, in layout units
    pub min_measure_width: f64,
    pub max_measure_width: f64,

    /// Number of snapshots kept in the undo history
    pub history_limit: usize,

    /// Duration given to newly inserted notes
    pub default_duration: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            click_threshold_px: 10.0,
            handle_hit_half_width: 6.0,
            note_hit_padding: 3.0,
            min_measure_width: 80.0,
            max_measure_width: 400.0,
            history_limit: 100,
            default_duration: Duration::Quarter,
        }
    }
}

impl EditorConfig {
    /// Clamp a measure width into the configured range
    pub fn clamp_measure_width(&self, width: f64) -> f64 {
        if width.is_nan() {
            return self.min_measure_width;
        }
        width.clamp(self.min_measure_width, self.max_measure_width.max(self.min_measure_width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_takes_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"clickThresholdPx": 4}"#).unwrap();
        assert_eq!(config.click_threshold_px, 4.0);
        assert_eq!(config.max_measure_width, 400.0);
        assert_eq!(config.default_duration, Duration::Quarter);
    }

    #[test]
    fn test_clamp_measure_width() {
        let config = EditorConfig::default();
        assert_eq!(config.clamp_measure_width(10.0), 80.0);
        assert_eq!(config.clamp_measure_width(1000.0), 400.0);
        assert_eq!(config.clamp_measure_width(150.0), 150.0);
    }
}

//! Canvas configuration.

use crate::eraser::DEFAULT_ERASE_THRESHOLD;
use serde::{Deserialize, Serialize};

/// Tunables for a drawing session. Every field has a default, so a partial
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Upper bound on canvas width in pixels.
    pub max_width: u32,
    /// Upper bound on canvas height in pixels.
    pub max_height: u32,
    /// Horizontal space reserved around the canvas in the viewport.
    pub horizontal_margin: u32,
    /// Vertical space reserved for title and toolbar.
    pub vertical_margin: u32,
    /// Canvas size before the first viewport measurement.
    pub initial_width: u32,
    pub initial_height: u32,
    /// Eraser hit radius in pixels.
    pub erase_threshold: f64,
    /// Title given to new documents.
    pub default_title: String,
    /// Group a new document is filed under when none is given.
    pub default_group_id: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 800,
            horizontal_margin: 100,
            vertical_margin: 200,
            initial_width: 800,
            initial_height: 600,
            erase_threshold: DEFAULT_ERASE_THRESHOLD,
            default_title: "Shakyo".to_string(),
            default_group_id: "1-2".to_string(),
        }
    }
}

impl CanvasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum canvas size.
    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Set the viewport margins.
    pub fn with_margins(mut self, horizontal: u32, vertical: u32) -> Self {
        self.horizontal_margin = horizontal;
        self.vertical_margin = vertical;
        self
    }

    /// Set the eraser hit radius.
    pub fn with_erase_threshold(mut self, threshold: f64) -> Self {
        self.erase_threshold = threshold;
        self
    }

    /// Set the title for new documents.
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the fallback group for new documents.
    pub fn with_default_group(mut self, group_id: impl Into<String>) -> Self {
        self.default_group_id = group_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: CanvasConfig = serde_json::from_str(r#"{"maxWidth": 640, "defaultTitle": "Notes"}"#).unwrap();
        assert_eq!(config.max_width, 640);
        assert_eq!(config.max_height, 800);
        assert_eq!(config.default_title, "Notes");
        assert!((config.erase_threshold - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder() {
        let config = CanvasConfig::new()
            .with_max_size(1000, 700)
            .with_margins(0, 0)
            .with_erase_threshold(5.0)
            .with_default_group("2-1");
        assert_eq!((config.max_width, config.max_height), (1000, 700));
        assert_eq!(config.horizontal_margin, 0);
        assert_eq!(config.default_group_id, "2-1");
    }
}

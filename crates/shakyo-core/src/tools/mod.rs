//! Tool selection and the remembered per-tool pen settings.

use crate::canvas::CanvasError;
use crate::color::HexColor;
use serde::{Deserialize, Serialize};

/// Colors offered by the palette.
pub const PRESET_COLORS: [HexColor; 5] = [
    HexColor::BLACK,
    HexColor::RED,
    HexColor::GREEN,
    HexColor::BLUE,
    HexColor::YELLOW,
];

/// Width presets for the pen.
pub const PEN_WIDTHS: [f64; 5] = [1.0, 2.0, 4.0, 6.0, 8.0];

/// Width presets for the highlighter (broader tips).
pub const HIGHLIGHTER_WIDTHS: [f64; 5] = [4.0, 8.0, 12.0, 16.0, 20.0];

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Highlighter,
    Eraser,
}

impl ToolKind {
    /// Width presets offered for this tool (empty for the eraser).
    pub fn width_presets(self) -> &'static [f64] {
        match self {
            ToolKind::Pen => &PEN_WIDTHS,
            ToolKind::Highlighter => &HIGHLIGHTER_WIDTHS,
            ToolKind::Eraser => &[],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Highlighter => "highlighter",
            ToolKind::Eraser => "eraser",
        }
    }
}

impl std::str::FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pen" => Ok(ToolKind::Pen),
            "highlighter" => Ok(ToolKind::Highlighter),
            "eraser" => Ok(ToolKind::Eraser),
            other => Err(format!("Unknown tool: {}", other)),
        }
    }
}

/// Color and width remembered for a drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub color: HexColor,
    pub width: f64,
}

impl ToolSettings {
    pub const fn new(color: HexColor, width: f64) -> Self {
        Self { color, width }
    }

    pub const fn pen() -> Self {
        Self::new(HexColor::BLACK, 2.0)
    }

    pub const fn highlighter() -> Self {
        Self::new(HexColor::YELLOW, 8.0)
    }
}

/// Read access the input state machine needs from the tool state.
pub trait ToolSource {
    /// Currently selected tool.
    fn active_tool(&self) -> ToolKind;

    /// Settings for new strokes, or `None` when the active tool does not draw.
    fn stroke_settings(&self) -> Option<ToolSettings>;
}

/// The active tool plus each drawing tool's remembered color and width.
///
/// Switching back to a tool restores the pair it had when last used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolState {
    active: ToolKind,
    pen: ToolSettings,
    highlighter: ToolSettings,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active: ToolKind::Pen,
            pen: ToolSettings::pen(),
            highlighter: ToolSettings::highlighter(),
        }
    }
}

impl ToolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    /// Select a tool; its remembered settings become the drawing settings.
    pub fn select(&mut self, tool: ToolKind) {
        self.active = tool;
    }

    /// Remembered settings for `tool` (`None` for the eraser).
    pub fn settings_for(&self, tool: ToolKind) -> Option<ToolSettings> {
        match tool {
            ToolKind::Pen => Some(self.pen),
            ToolKind::Highlighter => Some(self.highlighter),
            ToolKind::Eraser => None,
        }
    }

    fn active_settings_mut(&mut self) -> Result<&mut ToolSettings, CanvasError> {
        match self.active {
            ToolKind::Pen => Ok(&mut self.pen),
            ToolKind::Highlighter => Ok(&mut self.highlighter),
            ToolKind::Eraser => Err(CanvasError::ToolHasNoSettings(self.active)),
        }
    }

    /// Change the active tool's color.
    pub fn set_color(&mut self, color: HexColor) -> Result<(), CanvasError> {
        self.active_settings_mut()?.color = color;
        Ok(())
    }

    /// Change the active tool's width. Width must be finite and positive.
    pub fn set_width(&mut self, width: f64) -> Result<(), CanvasError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(CanvasError::InvalidWidth(width));
        }
        self.active_settings_mut()?.width = width;
        Ok(())
    }
}

impl ToolSource for ToolState {
    fn active_tool(&self) -> ToolKind {
        self.active
    }

    fn stroke_settings(&self) -> Option<ToolSettings> {
        self.settings_for(self.active)
    }
}

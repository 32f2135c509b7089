//! Hex color values used by strokes, tool settings and paper styling.

use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string is not a `#rgb` or `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hex color: {0:?}")]
pub struct ColorParseError(pub String);

/// An opaque sRGB color, persisted as a lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a render color with the given opacity (0.0..=1.0).
    pub fn with_alpha(self, alpha: f64) -> Color {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::from_rgba8(self.r, self.g, self.b, a)
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| err())
        };

        match digits.len() {
            3 => {
                // #rgb expands each nibble: #f80 == #ff8800
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

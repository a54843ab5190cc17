//! Tools, palette, stamps, and templates

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::{DrawingError, Result};

/// Colors offered in the palette, in display order
pub const PALETTE: [&str; 12] = [
    "#000000", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF", "#FFA500",
    "#800080", "#008000", "#FFC0CB", "#A52A2A",
];

/// Smallest brush width in pixels
pub const MIN_BRUSH_SIZE: u32 = 1;

/// Largest brush width in pixels
pub const MAX_BRUSH_SIZE: u32 = 20;

/// Brush width a new surface starts with
pub const DEFAULT_BRUSH_SIZE: u32 = 5;

/// Clamp a brush width into the supported range
pub fn clamp_brush_size(size: u32) -> u32 {
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

/// Parse a `#RRGGBB` string into an opaque pixel color
pub fn parse_color(hex: &str) -> Result<Rgba<u8>> {
    app_ui::parse_hex_color(hex)
        .map(|(r, g, b)| Rgba([r, g, b, 255]))
        .ok_or_else(|| DrawingError::InvalidColor(hex.to_string()))
}

/// What pointer strokes do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Paint with the current color
    #[default]
    Draw,
    /// Clear pixels back to transparent
    Eraser,
}

/// Outlined shapes stamped at the canvas center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stamp {
    /// Circle of radius 50
    Circle,
    /// 100x100 square
    Square,
    /// Triangle with its apex up and a 100 px base
    Triangle,
}

impl Stamp {
    /// Every stamp, in the order the shapes template draws them
    pub const ALL: [Stamp; 3] = [Stamp::Circle, Stamp::Square, Stamp::Triangle];
}

/// Tracing sheets that replace the canvas contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// The digits 1 to 5 in a row
    Numbers,
    /// Circle, square, and triangle outlines
    Shapes,
    /// Two rows of numbers from 1 to 10
    Counting,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_parses() {
        for hex in PALETTE {
            assert!(parse_color(hex).is_ok(), "{hex}");
        }
        assert_eq!(parse_color("#FFA500").unwrap(), Rgba([255, 165, 0, 255]));
    }

    #[test]
    fn test_invalid_color() {
        assert!(matches!(parse_color("orange"), Err(DrawingError::InvalidColor(_))));
    }

    #[test]
    fn test_brush_clamp() {
        assert_eq!(clamp_brush_size(0), 1);
        assert_eq!(clamp_brush_size(7), 7);
        assert_eq!(clamp_brush_size(50), 20);
    }
}

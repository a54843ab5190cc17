//! Design tokens for Kid Math
//!
//! This module provides design tokens for font sizes, spacing, corner
//! radius, and shadows. Values are CSS lengths as the styling layer
//! consumes them.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Font Size Tokens
// =============================================================================

/// Font sizes in rem
pub mod font_size {
    /// 0.8rem - Small print
    pub const SMALL: &str = "0.8rem";
    /// 1rem - Body text
    pub const MEDIUM: &str = "1rem";
    /// 1.5rem - Card titles
    pub const LARGE: &str = "1.5rem";
    /// 2rem - Section titles
    pub const XLARGE: &str = "2rem";
    /// 3rem - Page titles
    pub const XXLARGE: &str = "3rem";

    /// Get a font size by name
    pub fn get(name: &str) -> Option<&'static str> {
        match name {
            "small" => Some(SMALL),
            "medium" => Some(MEDIUM),
            "large" => Some(LARGE),
            "xlarge" => Some(XLARGE),
            "xxlarge" => Some(XXLARGE),
            _ => None,
        }
    }
}

// =============================================================================
// Spacing Tokens
// =============================================================================

/// Spacing scale in rem
pub mod spacing {
    /// 0.5rem - Small
    pub const SMALL: &str = "0.5rem";
    /// 1rem - Medium
    pub const MEDIUM: &str = "1rem";
    /// 2rem - Large
    pub const LARGE: &str = "2rem";
    /// 3rem - Extra large
    pub const XLARGE: &str = "3rem";

    /// Get spacing value by name
    pub fn get(name: &str) -> Option<&'static str> {
        match name {
            "small" => Some(SMALL),
            "medium" => Some(MEDIUM),
            "large" => Some(LARGE),
            "xlarge" => Some(XLARGE),
            _ => None,
        }
    }
}

// =============================================================================
// Radius Tokens
// =============================================================================

/// Corner radius
pub mod radius {
    /// Rounded corners used on every card and button
    pub const DEFAULT: &str = "20px";
}

// =============================================================================
// Shadow Tokens
// =============================================================================

/// Shadow definitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Horizontal offset in pixels
    pub offset_x: u16,
    /// Vertical offset in pixels
    pub offset_y: u16,
    /// Blur radius in pixels
    pub blur: u16,
    /// Black shadow opacity
    pub opacity: f32,
}

impl Shadow {
    /// Create a new shadow
    pub const fn new(offset_x: u16, offset_y: u16, blur: u16, opacity: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            blur,
            opacity,
        }
    }

    /// CSS `box-shadow` value, e.g. `0 2px 4px rgba(0,0,0,0.1)`
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

fn px(value: u16) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("{value}px")
    }
}

impl fmt::Display for Shadow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} rgba(0,0,0,{})",
            px(self.offset_x),
            px(self.offset_y),
            px(self.blur),
            self.opacity
        )
    }
}

/// Shadow presets
pub mod shadows {
    use super::Shadow;

    /// Small shadow
    pub const SMALL: Shadow = Shadow::new(0, 2, 4, 0.1);
    /// Medium shadow
    pub const MEDIUM: Shadow = Shadow::new(0, 4, 8, 0.15);
    /// Large shadow
    pub const LARGE: Shadow = Shadow::new(0, 8, 16, 0.2);
}

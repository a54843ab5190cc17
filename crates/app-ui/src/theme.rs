//! Theme provider for Kid Math
//!
//! A single bright theme shared by every screen. The [`Theme`] value is
//! serializable so a styling layer can consume it as one document.
//!
//! # Usage
//!
//! ```rust
//! use app_ui::theme::Theme;
//!
//! let theme = Theme::kid();
//! assert_eq!(theme.colors.primary, "#FF6B6B");
//! assert_eq!(theme.border_radius, "20px");
//! ```

use serde::{Deserialize, Serialize};

use crate::tokens::{font_size, radius, shadows, spacing};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = String;

/// Parse a hex color string to RGB components
///
/// Accepts `#RRGGBB` with or without the leading `#`.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Convert RGB to hex string
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

// =============================================================================
// Theme Colors
// =============================================================================

/// Named colors of the kid theme
pub mod palette {
    /// Coral red; counting and primary buttons
    pub const PRIMARY: &str = "#FF6B6B";
    /// Teal; shapes
    pub const SECONDARY: &str = "#4ECDC4";
    /// Sunny yellow; addition
    pub const ACCENT: &str = "#FFE66D";
    /// Page background
    pub const BACKGROUND: &str = "#F7F7F7";
    /// Body text
    pub const TEXT: &str = "#2C3E50";
    /// Correct answers
    pub const SUCCESS: &str = "#2ECC71";
    /// Warnings
    pub const WARNING: &str = "#F39C12";
    /// Wrong answers
    pub const ERROR: &str = "#E74C3C";
    /// Pure white
    pub const WHITE: &str = "#FFFFFF";
    /// Pure black
    pub const BLACK: &str = "#000000";
}

/// Theme color set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Primary color
    pub primary: Color,
    /// Secondary color
    pub secondary: Color,
    /// Accent color
    pub accent: Color,
    /// Page background
    pub background: Color,
    /// Body text
    pub text: Color,
    /// Success state
    pub success: Color,
    /// Warning state
    pub warning: Color,
    /// Error state
    pub error: Color,
    /// White
    pub white: Color,
    /// Black
    pub black: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: palette::PRIMARY.to_string(),
            secondary: palette::SECONDARY.to_string(),
            accent: palette::ACCENT.to_string(),
            background: palette::BACKGROUND.to_string(),
            text: palette::TEXT.to_string(),
            success: palette::SUCCESS.to_string(),
            warning: palette::WARNING.to_string(),
            error: palette::ERROR.to_string(),
            white: palette::WHITE.to_string(),
            black: palette::BLACK.to_string(),
        }
    }
}

impl ThemeColors {
    /// Look up a color by its theme key
    pub fn get(&self, name: &str) -> Option<&Color> {
        match name {
            "primary" => Some(&self.primary),
            "secondary" => Some(&self.secondary),
            "accent" => Some(&self.accent),
            "background" => Some(&self.background),
            "text" => Some(&self.text),
            "success" => Some(&self.success),
            "warning" => Some(&self.warning),
            "error" => Some(&self.error),
            "white" => Some(&self.white),
            "black" => Some(&self.black),
            _ => None,
        }
    }
}

// =============================================================================
// Fonts and Scales
// =============================================================================

/// Font families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Playful body font stack
    pub primary: String,
    /// Rounded heading font stack
    pub secondary: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            primary: "'Comic Sans MS', cursive, sans-serif".to_string(),
            secondary: "'Arial Rounded MT Bold', Arial, sans-serif".to_string(),
        }
    }
}

/// Font size scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSizes {
    /// Small
    pub small: String,
    /// Medium
    pub medium: String,
    /// Large
    pub large: String,
    /// Extra large
    pub xlarge: String,
    /// Extra extra large
    pub xxlarge: String,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            small: font_size::SMALL.to_string(),
            medium: font_size::MEDIUM.to_string(),
            large: font_size::LARGE.to_string(),
            xlarge: font_size::XLARGE.to_string(),
            xxlarge: font_size::XXLARGE.to_string(),
        }
    }
}

/// Spacing scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingScale {
    /// Small
    pub small: String,
    /// Medium
    pub medium: String,
    /// Large
    pub large: String,
    /// Extra large
    pub xlarge: String,
}

impl Default for SpacingScale {
    fn default() -> Self {
        Self {
            small: spacing::SMALL.to_string(),
            medium: spacing::MEDIUM.to_string(),
            large: spacing::LARGE.to_string(),
            xlarge: spacing::XLARGE.to_string(),
        }
    }
}

/// Shadow scale as CSS values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShadowScale {
    /// Small
    pub small: String,
    /// Medium
    pub medium: String,
    /// Large
    pub large: String,
}

impl Default for ShadowScale {
    fn default() -> Self {
        Self {
            small: shadows::SMALL.to_css(),
            medium: shadows::MEDIUM.to_css(),
            large: shadows::LARGE.to_css(),
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// The complete theme handed to every screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Colors
    pub colors: ThemeColors,
    /// Font families
    pub fonts: FontConfig,
    /// Font sizes
    pub sizes: FontSizes,
    /// Spacing
    pub spacing: SpacingScale,
    /// Corner radius
    pub border_radius: String,
    /// Shadows
    pub shadows: ShadowScale,
}

impl Default for Theme {
    fn default() -> Self {
        Self::kid()
    }
}

impl Theme {
    /// The kid theme
    pub fn kid() -> Self {
        Self {
            colors: ThemeColors::default(),
            fonts: FontConfig::default(),
            sizes: FontSizes::default(),
            spacing: SpacingScale::default(),
            border_radius: radius::DEFAULT.to_string(),
            shadows: ShadowScale::default(),
        }
    }

    /// Serialize the theme for the styling layer
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

//! User interface for Kid Math
//!
//! This crate provides the presentation layer: theming, design tokens,
//! navigation, and home screen content.
//!
//! # Design System
//!
//! One bright theme for small children:
//! - Primary: Coral (#FF6B6B)
//! - Secondary: Teal (#4ECDC4)
//! - Accent: Sunny yellow (#FFE66D)
//!
//! # Modules
//!
//! - [`theme`] - Theme provider and color helpers
//! - [`tokens`] - Design tokens (font sizes, spacing, radius, shadows)
//! - [`navigation`] - Routes and navigation state
//! - [`home`] - Activity cards for the landing page
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{Navigation, Route};
//! use app_ui::theme::Theme;
//!
//! let theme = Theme::kid();
//! let mut nav = Navigation::new();
//! nav.navigate(Route::Counting);
//! assert_eq!(nav.current().label(), "Count");
//! assert_eq!(theme.colors.success, "#2ECC71");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod home;
pub mod navigation;
pub mod theme;
pub mod tokens;

// Re-export commonly used types
pub use home::{ActivityCard, ACTIVITY_CARDS};
pub use navigation::{NavItem, Navigation, Route};
pub use theme::{parse_hex_color, rgb_to_hex, Theme, ThemeColors};
pub use tokens::{font_size, radius, shadows, spacing, Shadow};

//! Drawing canvas for Kid Math
//!
//! This crate provides the free-draw surface: brush and eraser strokes,
//! shape and text stamps, tracing templates, and PNG export over an
//! in-memory RGBA raster.
//!
//! # Modules
//!
//! - [`surface`] - The drawing surface and its operations
//! - [`tool`] - Tools, palette, stamps, and templates
//! - [`input`] - Mouse and touch normalization into pointer events
//! - [`glyphs`] - Built-in bitmap font for text stamps

#![warn(missing_docs)]
#![warn(clippy::all)]

use thiserror::Error;

pub mod glyphs;
pub mod input;
pub mod surface;
pub mod tool;

pub use input::{CanvasOrigin, PointerEvent, RawInput};
pub use surface::{DrawingSurface, DEFAULT_EXPORT_FILENAME};
pub use tool::{Stamp, Template, Tool, PALETTE};

/// Errors that can occur during drawing operations
#[derive(Debug, Error)]
pub enum DrawingError {
    /// Color string is not `#RRGGBB`
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Canvas dimensions are unusable
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Image encoding error
    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for drawing operations
pub type Result<T> = std::result::Result<T, DrawingError>;

//! Learning configuration
//!
//! Tunables for the activity screens and the drawing canvas. Every field
//! has a default, so a partial JSON document only overrides what it names.
//! The feedback delay is intentionally absent: it is a fixed constant
//! (`app_state::FEEDBACK_DELAY`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::problems::Difficulty;

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration document is malformed
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration for the learning activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningConfig {
    /// Problems per addition round
    pub addition_problem_count: usize,
    /// Difficulty the addition screen starts on
    pub default_difficulty: Difficulty,
    /// Highest number the counting game asks for
    pub counting_max: u32,
    /// Number of selectable objects in the counting pool
    pub counting_pool_size: usize,
    /// Whether screens start muted
    pub start_muted: bool,
    /// Drawing canvas width in pixels
    pub canvas_width: u32,
    /// Drawing canvas height in pixels
    pub canvas_height: u32,
    /// Initial brush width in pixels
    pub default_brush_size: u32,
    /// Initial drawing color as a hex string
    pub default_color: String,
    /// File name used when exporting a drawing
    pub export_filename: String,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            addition_problem_count: 10,
            default_difficulty: Difficulty::Easy,
            counting_max: 10,
            counting_pool_size: 10,
            start_muted: false,
            canvas_width: 800,
            canvas_height: 600,
            default_brush_size: 5,
            default_color: "#000000".to_string(),
            export_filename: "kid-math-drawing.png".to_string(),
        }
    }
}

impl LearningConfig {
    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::info!(path = %path.display(), "Loaded learning configuration");
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.addition_problem_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "additionProblemCount",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.counting_max == 0 {
            return Err(ConfigError::InvalidValue {
                field: "countingMax",
                reason: "must be at least 1".to_string(),
            });
        }
        if (self.counting_pool_size as u64) < u64::from(self.counting_max) {
            return Err(ConfigError::InvalidValue {
                field: "countingPoolSize",
                reason: format!("must hold at least {} objects", self.counting_max),
            });
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "canvasWidth/canvasHeight",
                reason: "canvas must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

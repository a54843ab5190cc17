//! Core learning logic for Kid Math
//!
//! This crate contains the business logic behind every screen: problem
//! generation, the shared answer/feedback game session, the counting,
//! shapes and addition activities, the assessment and progress engine,
//! and the video library.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod activities;
pub mod assessments;
pub mod audio;
pub mod config;
pub mod game;
pub mod problems;
pub mod videos;

pub use activities::{AdditionGame, CountingGame, ShapesGame, SumChecker};
pub use assessments::{Achievement, AssessmentEngine, AssessmentError, Quiz};
pub use audio::{SilentTonePlayer, SoundBoard, Tone, TonePlayer};
pub use config::{ConfigError, LearningConfig};
pub use game::{GamePhase, GameSession, MissPolicy};
pub use problems::{Difficulty, Shape};
pub use videos::{VideoEntry, VideoLibrary};

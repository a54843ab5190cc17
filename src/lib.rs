//! Kid Math
//!
//! Math learning activities for preschoolers: counting, shapes, and
//! addition games, a video library, a drawing canvas, and assessments
//! that unlock as progress is made.
//!
//! The workspace is layered:
//! - `app-state` - Shared progress and the feedback timer
//! - `app-core` - Games, assessments, videos, and configuration
//! - `app-ui` - Theme, navigation, and home screen content
//! - `drawing` - The drawing surface and PNG export
//!
//! This crate ties them together in [`KidMathApp`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod logging;

pub use app::{AppError, KidMathApp, Screen};
pub use logging::init_tracing;

pub use app_core;
pub use app_state;
pub use app_ui;
pub use drawing;

//! Application state management for Kid Math
//!
//! This crate provides the process-wide learning progress store and the
//! fixed-delay feedback timer shared by every activity screen.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod progress;
pub mod timer;

pub use progress::{ProgressEntry, ProgressStore};
pub use timer::{FeedbackCycle, FeedbackScheduler, FeedbackTicket, TicketIssuer, FEEDBACK_DELAY};

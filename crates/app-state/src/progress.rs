//! Learning progress tracking
//!
//! This module holds the per-quiz progress map shared by every screen.
//! The store is seeded once with a snapshot, lives for the lifetime of the
//! process, and is only ever mutated by recording a quiz completion.
//! Entries are never removed and a completed entry never reverts.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Highest score a progress entry can hold
pub const MAX_SCORE: u8 = 100;

/// Progress record for a single quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    /// Whether the quiz has been completed at least once
    pub completed: bool,
    /// Percentage score of the latest completion (0-100)
    pub score: u8,
    /// Whether the companion video has been watched
    pub video_watched: bool,
}

impl ProgressEntry {
    /// Create a not-yet-completed entry
    pub fn pending(video_watched: bool) -> Self {
        Self {
            completed: false,
            score: 0,
            video_watched,
        }
    }

    /// Create a completed entry with the given score
    pub fn completed(score: u8, video_watched: bool) -> Self {
        Self {
            completed: true,
            score: score.min(MAX_SCORE),
            video_watched,
        }
    }
}

/// Shared, cloneable handle to the learning progress map
///
/// Every clone observes the same underlying entries.
///
/// # Example
///
/// ```rust
/// use app_state::progress::{ProgressEntry, ProgressStore};
///
/// let store = ProgressStore::seeded([
///     ("counting-basic".to_string(), ProgressEntry::completed(90, true)),
/// ]);
/// let screen_view = store.clone();
///
/// store.record_completion("shapes-basic", 75);
/// assert_eq!(screen_view.completed_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgressStore {
    entries: Arc<RwLock<BTreeMap<String, ProgressEntry>>>,
}

impl ProgressStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an initial snapshot
    pub fn seeded<I>(snapshot: I) -> Self
    where
        I: IntoIterator<Item = (String, ProgressEntry)>,
    {
        let entries: BTreeMap<String, ProgressEntry> = snapshot.into_iter().collect();
        tracing::debug!(entries = entries.len(), "Seeded progress store");
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Get the entry for a quiz, if one exists
    pub fn get(&self, quiz_id: &str) -> Option<ProgressEntry> {
        self.entries.read().get(quiz_id).copied()
    }

    /// Check whether a quiz has been completed
    ///
    /// A missing entry counts as not completed.
    pub fn is_completed(&self, quiz_id: &str) -> bool {
        self.get(quiz_id).map(|e| e.completed).unwrap_or(false)
    }

    /// Record a quiz completion
    ///
    /// Creates the entry if absent. The `video_watched` flag of an existing
    /// entry is preserved; the score is clamped to 100.
    pub fn record_completion(&self, quiz_id: &str, score: u8) -> ProgressEntry {
        let mut entries = self.entries.write();
        let entry = entries.entry(quiz_id.to_string()).or_default();
        entry.completed = true;
        entry.score = score.min(MAX_SCORE);
        let updated = *entry;
        drop(entries);

        tracing::info!(quiz_id, score = updated.score, "Recorded quiz completion");
        updated
    }

    /// Number of completed entries
    pub fn completed_count(&self) -> usize {
        self.entries.read().values().filter(|e| e.completed).count()
    }

    /// Number of entries, completed or not
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every entry, ordered by quiz identifier
    pub fn snapshot(&self) -> BTreeMap<String, ProgressEntry> {
        self.entries.read().clone()
    }
}

//! Audio cues for the activity screens
//!
//! Screens never talk to an audio device directly. They hold a
//! [`SoundBoard`] wrapping an injected [`TonePlayer`], which is a
//! fire-and-forget capability: playback has no effect on game state.

use std::sync::Arc;
use std::time::Duration;

/// A single sine tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in hertz
    pub frequency_hz: f32,
    /// How long the tone lasts
    pub duration: Duration,
}

impl Tone {
    /// Create a tone from a frequency and a duration in milliseconds
    pub const fn new(frequency_hz: f32, duration_ms: u64) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
        }
    }
}

/// Tone played for a correct answer
pub const CORRECT_TONE: Tone = Tone::new(800.0, 500);

/// Tone played for an incorrect answer
pub const MISS_TONE: Tone = Tone::new(200.0, 300);

/// Capability for playing tones
#[cfg_attr(test, mockall::automock)]
pub trait TonePlayer: Send + Sync {
    /// Play a tone without waiting for it to finish
    fn play_tone(&self, tone: Tone);
}

/// Player that discards every tone
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTonePlayer;

impl TonePlayer for SilentTonePlayer {
    fn play_tone(&self, _tone: Tone) {}
}

/// Per-screen audio output with a mute switch
#[derive(Clone)]
pub struct SoundBoard {
    player: Arc<dyn TonePlayer>,
    muted: bool,
}

impl SoundBoard {
    /// Create an unmuted sound board
    pub fn new(player: Arc<dyn TonePlayer>) -> Self {
        Self {
            player,
            muted: false,
        }
    }

    /// Create a sound board that never plays
    pub fn silent() -> Self {
        Self::new(Arc::new(SilentTonePlayer))
    }

    /// Set the initial mute state
    pub fn with_muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    /// Play a tone unless muted
    pub fn play(&self, tone: Tone) {
        if !self.muted {
            self.player.play_tone(tone);
        }
    }

    /// Flip the mute switch, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl std::fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBoard").field("muted", &self.muted).finish()
    }
}

//! Core types for playback coordination

use serde::{Deserialize, Serialize};

/// Playback phase
///
/// Lifecycle: `Idle → Loading → Ready → Playing ↔ Paused → Stopped`.
/// `Error` is reachable from any phase on an engine failure; the only way
/// out of `Error` is a fresh play command (back to `Loading`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// No media loaded
    #[default]
    Idle,

    /// Engine is preparing media
    Loading,

    /// Prepared and ready to start
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Stopped (media may still be loaded)
    Stopped,

    /// Engine reported a failure
    Error,
}

/// Repeat mode
///
/// Governs navigation edge behavior only, never ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Wrap around at either end
    All,

    /// Repeat the current track indefinitely
    One,
}

impl RepeatMode {
    /// Next mode in the cycle: Off → All → One → Off
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// What to do with a seek issued while the duration is still unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingSeekPolicy {
    /// Issue optimistically, remember the target, and re-validate once the
    /// duration resolves
    #[default]
    Deferred,

    /// Ignore the request entirely
    Dropped,
}

/// Configuration for the session coordinator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial shuffle state (default: off)
    pub shuffle: bool,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Seek-while-loading policy (default: Deferred)
    pub seek_policy: PendingSeekPolicy,
}

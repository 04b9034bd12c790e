//! Published playback state
//!
//! Immutable value types fanned out to UI observers. The session coordinator
//! is the only writer; everyone else holds read-only copies delivered
//! through watch channels (late subscribers immediately see the current
//! value).

use crate::navigation::ContextKind;
use crate::types::{PlaybackPhase, RepeatMode};
use chorus_core::types::{Track, User};
use serde::{Deserialize, Serialize};

/// The single current description of what is playing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Track currently loaded (if any)
    pub track: Option<Track>,

    /// Uploader of the current track
    pub uploader: Option<User>,

    /// Playback phase
    pub phase: PlaybackPhase,

    /// Playback position in milliseconds
    pub position_ms: u64,

    /// Track duration in milliseconds (0 while unknown)
    pub duration_ms: u64,

    /// Whether shuffle is active
    pub shuffle: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Position in the active queue ordering; `None` when the queue is empty
    pub queue_index: Option<usize>,

    /// Message from the most recent engine failure, cleared by the next
    /// successful play command
    pub error: Option<String>,
}

impl PlaybackSnapshot {
    /// Whether audio is currently rendering
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    /// Whether playback is paused mid-track
    pub fn is_paused(&self) -> bool {
        self.phase == PlaybackPhase::Paused
    }

    /// Whether the engine is preparing media
    pub fn is_loading(&self) -> bool {
        self.phase == PlaybackPhase::Loading
    }

    /// Whether the last engine command failed
    pub fn has_error(&self) -> bool {
        self.phase == PlaybackPhase::Error
    }

    /// Progress through the track as a percentage, 0 while duration unknown
    pub fn progress_percent(&self) -> u8 {
        if self.duration_ms == 0 {
            return 0;
        }
        ((self.position_ms * 100) / self.duration_ms).min(100) as u8
    }

    /// "m:ss" rendering of the current position
    pub fn formatted_position(&self) -> String {
        format_time(self.position_ms)
    }

    /// "m:ss" rendering of the duration
    pub fn formatted_duration(&self) -> String {
        format_time(self.duration_ms)
    }
}

fn format_time(time_ms: u64) -> String {
    let seconds = time_ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Display projection of the queue for player screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueInfo {
    /// Position in the active ordering; `None` when the queue is empty
    pub current_index: Option<usize>,

    /// Total number of queued tracks
    pub total: usize,

    /// Whether an earlier track exists
    pub has_previous: bool,

    /// Whether a later track exists
    pub has_next: bool,

    /// Queue title (playlist name, artist name, search banner, ...)
    pub title: String,

    /// Provenance of the queue
    pub kind: ContextKind,
}

impl Default for QueueInfo {
    fn default() -> Self {
        Self {
            current_index: None,
            total: 0,
            has_previous: false,
            has_next: false,
            title: String::new(),
            kind: ContextKind::General,
        }
    }
}

impl QueueInfo {
    /// "3 of 12 songs" display text, empty for an empty queue
    pub fn position_text(&self) -> String {
        match self.current_index {
            Some(index) if self.total > 0 => format!("{} of {} songs", index + 1, self.total),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_percentage() {
        let mut snapshot = PlaybackSnapshot {
            position_ms: 30_000,
            duration_ms: 120_000,
            ..Default::default()
        };
        assert_eq!(snapshot.progress_percent(), 25);

        snapshot.duration_ms = 0;
        assert_eq!(snapshot.progress_percent(), 0);

        snapshot.duration_ms = 10_000;
        snapshot.position_ms = 50_000;
        assert_eq!(snapshot.progress_percent(), 100);
    }

    #[test]
    fn time_formatting() {
        let snapshot = PlaybackSnapshot {
            position_ms: 65_000,
            duration_ms: 600_000,
            ..Default::default()
        };
        assert_eq!(snapshot.formatted_position(), "1:05");
        assert_eq!(snapshot.formatted_duration(), "10:00");
    }

    #[test]
    fn queue_position_text() {
        let info = QueueInfo {
            current_index: Some(2),
            total: 12,
            ..Default::default()
        };
        assert_eq!(info.position_text(), "3 of 12 songs");
        assert_eq!(QueueInfo::default().position_text(), "");
    }
}

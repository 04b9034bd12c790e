/// Track domain type
use crate::types::{TrackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An uploaded audio track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier (assigned by storage)
    pub id: TrackId,

    /// User who uploaded the track
    pub uploader_id: UserId,

    /// Uploader display name (populated via join, not stored on the track)
    pub uploader_name: Option<String>,

    /// Track title
    pub title: String,

    /// Free-form description
    pub description: Option<String>,

    /// Locator of the audio payload
    pub audio_url: String,

    /// Locator of the cover art
    pub cover_art_url: Option<String>,

    /// Genre label
    pub genre: Option<String>,

    /// Track duration in milliseconds (unknown until the engine loads it)
    pub duration_ms: Option<u64>,

    /// Whether the track is publicly visible
    pub is_public: bool,

    /// When the track was uploaded
    pub created_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(uploader_id: UserId, title: impl Into<String>, audio_url: impl Into<String>) -> Self {
        Self {
            id: 0,
            uploader_id,
            uploader_name: None,
            title: title.into(),
            description: None,
            audio_url: audio_url.into(),
            cover_art_url: None,
            genre: None,
            duration_ms: None,
            is_public: true,
            created_at: Utc::now(),
        }
    }

    /// Get the track duration as a `Duration`, when known
    pub fn duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }

    /// Whether the track carries an audio locator the engine can load
    pub fn has_audio(&self) -> bool {
        !self.audio_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_creation() {
        let track = Track::new(7, "Test Song", "https://cdn.example/test.mp3");
        assert_eq!(track.title, "Test Song");
        assert_eq!(track.uploader_id, 7);
        assert!(track.is_public);
        assert!(track.duration_ms.is_none());
    }

    #[test]
    fn duration_conversion() {
        let mut track = Track::new(1, "Song", "https://cdn.example/song.mp3");
        track.duration_ms = Some(180_000);
        assert_eq!(track.duration(), Some(Duration::from_secs(180)));
    }

    #[test]
    fn blank_locator_has_no_audio() {
        let track = Track::new(1, "Song", "   ");
        assert!(!track.has_audio());
    }
}
